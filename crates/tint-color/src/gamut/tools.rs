//! Shared helpers for the fitters.

use tint_math::scalar::sign;

/// Adaptive lightness anchor for chroma compression.
///
/// Björn Ottosson's hue-independent "adaptive L0" from his sRGB gamut
/// clipping write-up. `l` and `c` are normalized against the lightness of
/// white; `alpha` controls how strongly the anchor follows the color's
/// lightness as chroma grows. `alpha = 0` pins the anchor to mid gray for
/// saturated colors and to `l` for grays.
///
/// ```rust
/// use tint_color::gamut::adaptive_hue_independent;
///
/// // A gray anchors to itself.
/// assert!((adaptive_hue_independent(0.8, 0.0, 0.05) - 0.8).abs() < 1e-12);
/// ```
pub fn adaptive_hue_independent(l: f64, c: f64, alpha: f64) -> f64 {
    let ld = l - 0.5;
    let abs_ld = ld.abs();
    let e1 = 0.5 + abs_ld + alpha * c;
    0.5 * (1.0 + sign(ld) * (e1 - (e1 * e1 - 2.0 * abs_ld).sqrt()))
}
