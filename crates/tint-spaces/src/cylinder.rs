//! HSL, HSV and HWB: cylindrical re-expressions of sRGB.
//!
//! These spaces have no gamut of their own. Their bounds are checked by
//! converting to `srgb` ([`Space::gamut_check`]), and ray tracing treats them
//! as an RGB cube through the free functions below.
//!
//! ```text
//! srgb ── hsl
//!     └── hsv ── hwb
//! ```

use tint_core::{Channel, Space, SpaceKind};
use tint_math::scalar::{constrain_hue, no_nan};

const ACHROMATIC: f64 = 1e-7;

static HSL_CHANNELS: [Channel; 3] = [
    Channel::angle("h"),
    Channel::bounded("s", 0.0, 1.0),
    Channel::bounded("l", 0.0, 1.0),
];

static HSV_CHANNELS: [Channel; 3] = [
    Channel::angle("h"),
    Channel::bounded("s", 0.0, 1.0),
    Channel::bounded("v", 0.0, 1.0),
];

static HWB_CHANNELS: [Channel; 3] = [
    Channel::angle("h"),
    Channel::bounded("w", 0.0, 1.0),
    Channel::bounded("b", 0.0, 1.0),
];

// Hue in degrees from the max channel; 0 for grays.
fn rgb_hue(rgb: [f64; 3], max: f64, chroma: f64) -> f64 {
    let [r, g, b] = rgb;
    if chroma == 0.0 {
        return 0.0;
    }
    let sector = if max == r {
        (g - b) / chroma
    } else if max == g {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };
    constrain_hue(sector * 60.0)
}

/// sRGB to HSL. Negative saturation is folded into the opposite hue.
pub fn srgb_to_hsl(rgb: [f64; 3]) -> [f64; 3] {
    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    let min = rgb[0].min(rgb[1]).min(rgb[2]);
    let l = (min + max) / 2.0;
    let chroma = max - min;
    let mut h = rgb_hue(rgb, max, chroma);
    let mut s = if chroma == 0.0 || l == 0.0 || l == 1.0 {
        0.0
    } else {
        (max - l) / l.min(1.0 - l)
    };
    if s < 0.0 {
        s = -s;
        h = constrain_hue(h + 180.0);
    }
    [h, s, l]
}

/// HSL to sRGB.
pub fn hsl_to_srgb(hsl: [f64; 3]) -> [f64; 3] {
    let [h, s, l] = hsl;
    let h = constrain_hue(no_nan(h));
    let a = s * l.min(1.0 - l);
    let f = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
    };
    [f(0.0), f(8.0), f(4.0)]
}

/// sRGB to HSV.
pub fn srgb_to_hsv(rgb: [f64; 3]) -> [f64; 3] {
    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    let min = rgb[0].min(rgb[1]).min(rgb[2]);
    let chroma = max - min;
    let h = rgb_hue(rgb, max, chroma);
    let s = if max == 0.0 { 0.0 } else { chroma / max };
    [h, s, max]
}

/// HSV to sRGB.
pub fn hsv_to_srgb(hsv: [f64; 3]) -> [f64; 3] {
    let [h, s, v] = hsv;
    let h = constrain_hue(no_nan(h));
    let f = |n: f64| {
        let k = (n + h / 60.0) % 6.0;
        v - v * s * k.min(4.0 - k).min(1.0).max(0.0)
    };
    [f(5.0), f(3.0), f(1.0)]
}

/// HSV to HWB.
pub fn hsv_to_hwb(hsv: [f64; 3]) -> [f64; 3] {
    let [h, s, v] = hsv;
    [h, (1.0 - s) * v, 1.0 - v]
}

/// HWB to HSV. Whiteness plus blackness past 1 is normalized to a gray.
pub fn hwb_to_hsv(hwb: [f64; 3]) -> [f64; 3] {
    let [h, w, b] = hwb;
    let wb = w + b;
    if wb >= 1.0 {
        return [h, 0.0, w / wb];
    }
    let v = 1.0 - b;
    let s = if v == 0.0 { 1.0 } else { 1.0 - w / v };
    [h, s, v]
}

/// sRGB to HWB.
pub fn srgb_to_hwb(rgb: [f64; 3]) -> [f64; 3] {
    hsv_to_hwb(srgb_to_hsv(rgb))
}

/// HWB to sRGB.
pub fn hwb_to_srgb(hwb: [f64; 3]) -> [f64; 3] {
    hsv_to_srgb(hwb_to_hsv(hwb))
}

/// HSL over sRGB.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hsl;

impl Space for Hsl {
    fn name(&self) -> &'static str {
        "hsl"
    }

    fn base(&self) -> Option<&'static str> {
        Some("srgb")
    }

    fn channels(&self) -> &[Channel; 3] {
        &HSL_CHANNELS
    }

    fn kind(&self) -> SpaceKind {
        SpaceKind::Hsl
    }

    fn to_base(&self, coords: [f64; 3]) -> [f64; 3] {
        hsl_to_srgb(coords)
    }

    fn from_base(&self, coords: [f64; 3]) -> [f64; 3] {
        srgb_to_hsl(coords)
    }

    fn gamut_check(&self) -> Option<&'static str> {
        Some("srgb")
    }

    fn is_achromatic(&self, coords: [f64; 3]) -> bool {
        let [_, s, l] = coords;
        s.abs() < ACHROMATIC || l.abs() < ACHROMATIC || (1.0 - l).abs() < ACHROMATIC
    }
}

/// HSV over sRGB.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hsv;

impl Space for Hsv {
    fn name(&self) -> &'static str {
        "hsv"
    }

    fn base(&self) -> Option<&'static str> {
        Some("srgb")
    }

    fn channels(&self) -> &[Channel; 3] {
        &HSV_CHANNELS
    }

    fn kind(&self) -> SpaceKind {
        SpaceKind::Hsv
    }

    fn to_base(&self, coords: [f64; 3]) -> [f64; 3] {
        hsv_to_srgb(coords)
    }

    fn from_base(&self, coords: [f64; 3]) -> [f64; 3] {
        srgb_to_hsv(coords)
    }

    fn gamut_check(&self) -> Option<&'static str> {
        Some("srgb")
    }

    fn is_achromatic(&self, coords: [f64; 3]) -> bool {
        coords[1].abs() < ACHROMATIC || coords[2].abs() < ACHROMATIC
    }
}

/// HWB over HSV.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hwb;

impl Space for Hwb {
    fn name(&self) -> &'static str {
        "hwb"
    }

    fn base(&self) -> Option<&'static str> {
        Some("hsv")
    }

    fn channels(&self) -> &[Channel; 3] {
        &HWB_CHANNELS
    }

    fn kind(&self) -> SpaceKind {
        SpaceKind::Hwb
    }

    fn to_base(&self, coords: [f64; 3]) -> [f64; 3] {
        hwb_to_hsv(coords)
    }

    fn from_base(&self, coords: [f64; 3]) -> [f64; 3] {
        hsv_to_hwb(coords)
    }

    fn gamut_check(&self) -> Option<&'static str> {
        Some("srgb")
    }

    fn is_achromatic(&self, coords: [f64; 3]) -> bool {
        coords[1] + coords[2] >= 1.0 - ACHROMATIC
    }
}
