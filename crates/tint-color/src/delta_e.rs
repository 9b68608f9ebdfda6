//! Color difference (Delta E).
//!
//! | Method        | Name     | Space     | Notes                         |
//! |---------------|----------|-----------|-------------------------------|
//! | [`DeltaE::Cie76`]     | `"76"`   | `lab-d65` | Euclidean distance            |
//! | [`DeltaE::Ok`]        | `"ok"`   | `oklab`   | Euclidean distance            |
//! | [`DeltaE::Ciede2000`] | `"2000"` | `lab-d65` | CIEDE2000, kL = kC = kH = 1   |

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::{ColorError, ColorResult};

/// A Delta E formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeltaE {
    /// CIE 1976: Euclidean distance in Lab.
    #[cfg_attr(feature = "serde", serde(rename = "76"))]
    Cie76,
    /// Euclidean distance in Oklab.
    #[cfg_attr(feature = "serde", serde(rename = "ok"))]
    Ok,
    /// CIEDE2000.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "2000"))]
    Ciede2000,
}

impl DeltaE {
    /// Short name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Cie76 => "76",
            Self::Ok => "ok",
            Self::Ciede2000 => "2000",
        }
    }

    /// Distance between two colors in any spaces.
    pub fn distance(self, a: &Color, b: &Color) -> ColorResult<f64> {
        match self {
            Self::Cie76 => Ok(euclidean(a.convert("lab-d65")?.coords(), b.convert("lab-d65")?.coords())),
            Self::Ok => Ok(euclidean(a.convert("oklab")?.coords(), b.convert("oklab")?.coords())),
            Self::Ciede2000 => Ok(ciede2000(a.convert("lab-d65")?.coords(), b.convert("lab-d65")?.coords())),
        }
    }
}

impl FromStr for DeltaE {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "76" | "cie76" => Ok(Self::Cie76),
            "ok" => Ok(Self::Ok),
            "2000" | "ciede2000" => Ok(Self::Ciede2000),
            _ => Err(ColorError::UnknownDeltaE { name: s.to_string() }),
        }
    }
}

impl fmt::Display for DeltaE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn euclidean(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter().zip(&b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
}

const POW7_25: f64 = 6_103_515_625.0; // 25^7

/// CIEDE2000 between two Lab colors.
pub fn ciede2000(lab1: [f64; 3], lab2: [f64; 3]) -> f64 {
    let [l1, a1, b1] = lab1;
    let [l2, a2, b2] = lab2;

    let c1 = a1.hypot(b1);
    let c2 = a2.hypot(b2);
    let cm7 = ((c1 + c2) / 2.0).powi(7);
    let g = 0.5 * (1.0 - (cm7 / (cm7 + POW7_25)).sqrt());

    let a1p = a1 * (1.0 + g);
    let a2p = a2 * (1.0 + g);
    let c1p = a1p.hypot(b1);
    let c2p = a2p.hypot(b2);

    let hue = |b: f64, a: f64| {
        if a == 0.0 && b == 0.0 {
            0.0
        } else {
            b.atan2(a).to_degrees().rem_euclid(360.0)
        }
    };
    let h1p = hue(b1, a1p);
    let h2p = hue(b2, a2p);

    let dl = l2 - l1;
    let dc = c2p - c1p;
    let dh = if c1p * c2p == 0.0 {
        0.0
    } else {
        let d = h2p - h1p;
        if d > 180.0 {
            d - 360.0
        } else if d < -180.0 {
            d + 360.0
        } else {
            d
        }
    };
    let dh_big = 2.0 * (c1p * c2p).sqrt() * (dh.to_radians() / 2.0).sin();

    let lm = (l1 + l2) / 2.0;
    let cm = (c1p + c2p) / 2.0;
    let hm = if c1p * c2p == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (hm - 30.0).to_radians().cos()
        + 0.24 * (2.0 * hm).to_radians().cos()
        + 0.32 * (3.0 * hm + 6.0).to_radians().cos()
        - 0.20 * (4.0 * hm - 63.0).to_radians().cos();

    let lm50 = (lm - 50.0) * (lm - 50.0);
    let sl = 1.0 + 0.015 * lm50 / (20.0 + lm50).sqrt();
    let sc = 1.0 + 0.045 * cm;
    let sh = 1.0 + 0.015 * cm * t;

    let cm7p = cm.powi(7);
    let rc = 2.0 * (cm7p / (cm7p + POW7_25)).sqrt();
    let dtheta = 30.0 * (-((hm - 275.0) / 25.0).powi(2)).exp();
    let rt = -(2.0 * dtheta * PI / 180.0).sin() * rc;

    let tl = dl / sl;
    let tc = dc / sc;
    let th = dh_big / sh;
    (tl * tl + tc * tc + th * th + rt * tc * th).sqrt()
}
