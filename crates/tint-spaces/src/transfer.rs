//! Transfer functions between encoded and linear RGB.
//!
//! All curves are sign preserving, so out-of-gamut negative values survive a
//! round trip. That matters for gamut mapping: the fitters need to see how
//! far outside the cube a color is.
//!
//! | Curve      | Used by                 | Reference          |
//! |------------|-------------------------|--------------------|
//! | sRGB       | `srgb`, `display-p3`    | IEC 61966-2-1      |
//! | Rec.2020   | `rec2020`               | ITU-R BT.2020      |
//! | PQ         | `rec2100-pq`            | SMPTE ST 2084      |

/// Which curve a space encodes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// Piecewise sRGB curve.
    Srgb,
    /// Rec.2020 camera curve.
    Rec2020,
    /// Perceptual quantizer, scaled so diffuse white (203 cd/m²) is 1.0 linear.
    Pq,
}

impl Transfer {
    /// Encoded to linear.
    pub fn to_linear(self, v: f64) -> f64 {
        match self {
            Transfer::Srgb => srgb::eotf(v),
            Transfer::Rec2020 => rec2020::eotf(v),
            // the curve dips below zero under the encoding of black
            Transfer::Pq => pq::signed(v, |x| pq::eotf(x).max(0.0) / pq::REFERENCE_WHITE),
        }
    }

    /// Linear to encoded.
    pub fn from_linear(self, v: f64) -> f64 {
        match self {
            Transfer::Srgb => srgb::oetf(v),
            Transfer::Rec2020 => rec2020::oetf(v),
            Transfer::Pq => pq::signed(v, |x| pq::inverse_eotf(x * pq::REFERENCE_WHITE)),
        }
    }
}

/// sRGB curve.
pub mod srgb {
    /// Decodes sRGB to linear light.
    ///
    /// ```text
    /// |V| <= 0.04045:  L = V / 12.92
    /// otherwise:       L = sign(V) * ((|V| + 0.055) / 1.055)^2.4
    /// ```
    #[inline]
    pub fn eotf(v: f64) -> f64 {
        let abs = v.abs();
        if abs <= 0.04045 {
            v / 12.92
        } else {
            v.signum() * ((abs + 0.055) / 1.055).powf(2.4)
        }
    }

    /// Encodes linear light to sRGB.
    #[inline]
    pub fn oetf(l: f64) -> f64 {
        let abs = l.abs();
        if abs <= 0.0031308 {
            l * 12.92
        } else {
            l.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
        }
    }
}

/// Rec.2020 curve (12-bit constants).
pub mod rec2020 {
    const ALPHA: f64 = 1.09929682680944;
    const BETA: f64 = 0.018053968510807;
    const BETA45: f64 = BETA * 4.5;

    /// Decodes Rec.2020 to linear light.
    #[inline]
    pub fn eotf(v: f64) -> f64 {
        let abs = v.abs();
        if abs < BETA45 {
            v / 4.5
        } else {
            v.signum() * ((abs + ALPHA - 1.0) / ALPHA).powf(1.0 / 0.45)
        }
    }

    /// Encodes linear light to Rec.2020.
    #[inline]
    pub fn oetf(l: f64) -> f64 {
        let abs = l.abs();
        if abs < BETA {
            l * 4.5
        } else {
            l.signum() * (ALPHA * abs.powf(0.45) - (ALPHA - 1.0))
        }
    }
}

/// SMPTE ST 2084 perceptual quantizer.
pub mod pq {
    use tint_math::scalar::spow;

    /// Diffuse white in cd/m².
    pub const REFERENCE_WHITE: f64 = 203.0;

    const M1: f64 = 2610.0 / 16384.0;
    const M2: f64 = 2523.0 / 32.0;
    const C1: f64 = 3424.0 / 4096.0;
    const C2: f64 = 2413.0 / 128.0;
    const C3: f64 = 2392.0 / 128.0;

    /// Encoded signal to absolute luminance in cd/m².
    pub fn eotf(v: f64) -> f64 {
        let p = spow(v, 1.0 / M2);
        let r = (p - C1) / (C2 - C3 * p);
        10000.0 * spow(r, 1.0 / M1)
    }

    /// Runs `curve` on `|v|` and puts the sign of `v` back; zero counts as positive.
    #[inline]
    pub fn signed(v: f64, curve: impl Fn(f64) -> f64) -> f64 {
        let out = curve(v.abs());
        if v < 0.0 { -out } else { out }
    }

    /// Absolute luminance in cd/m² to encoded signal.
    pub fn inverse_eotf(nits: f64) -> f64 {
        let y = spow(nits / 10000.0, M1);
        let r = (C1 + C2 * y) / (1.0 + C3 * y);
        spow(r, M2)
    }
}
