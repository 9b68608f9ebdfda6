//! Shared rectangular <-> cylindrical conversion for LCh-style spaces.

use tint_math::scalar::{no_nan, polar_to_rect, rect_to_polar};

/// `[l, a, b]` to `[l, c, h]`.
#[inline]
pub fn lab_to_lch(lab: [f64; 3]) -> [f64; 3] {
    let [l, a, b] = lab;
    let (c, h) = rect_to_polar(a, b);
    [l, c, h]
}

/// `[l, c, h]` to `[l, a, b]`. An undefined hue reads as 0 and negative
/// chroma as none.
#[inline]
pub fn lch_to_lab(lch: [f64; 3]) -> [f64; 3] {
    let [l, c, h] = lch;
    let (a, b) = polar_to_rect(c.max(0.0), no_nan(h));
    [l, a, b]
}
