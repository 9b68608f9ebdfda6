//! Gamut verification, clipping and the fitting algorithms.
//!
//! The verifier and clipper work on raw coordinates plus the channel
//! descriptors of the space they are expressed in:
//!
//! ```text
//! channel          in_gamut                    clip_channels
//! -------          --------                    -------------
//! bounded          low - tol <= v <= high + tol clamp to [low, high]
//! unbounded        pass                        untouched
//! angle            pass                        wrap to [0, 360)
//! NaN value        pass                        untouched
//! ```
//!
//! The fitters live in submodules and are selected through
//! [`FitMethod`](crate::FitMethod).

use tint_core::Channel;
use tint_math::scalar::constrain_hue;

pub mod bisect;
pub mod coerce;
pub mod oklch_raytrace;
pub mod raytrace;
pub mod scale;
pub mod tools;

pub use bisect::ChromaBisect;
pub use coerce::CoercedRgb;
pub use oklch_raytrace::OklchRayTrace;
pub use raytrace::RayTrace;
pub use scale::Scale;
pub use tools::adaptive_hue_independent;

/// Tolerance used by [`Color::in_gamut`](crate::Color::in_gamut) when none is given.
pub const DEFAULT_FIT_TOLERANCE: f64 = 0.000075;

/// Whether every bounded channel lies within its range, widened by `tolerance`.
///
/// # Example
///
/// ```rust
/// use tint_color::gamut::in_gamut;
/// use tint_spaces::rgb::RGB_CHANNELS;
///
/// assert!(in_gamut([1.0, 0.5, 0.0], &RGB_CHANNELS, 0.0));
/// assert!(!in_gamut([1.0 + 1e-6, 0.5, 0.0], &RGB_CHANNELS, 0.0));
/// assert!(in_gamut([f64::NAN, 0.5, 0.0], &RGB_CHANNELS, 0.0));
/// ```
pub fn in_gamut(coords: [f64; 3], channels: &[Channel; 3], tolerance: f64) -> bool {
    coords.iter().zip(channels).all(|(&v, ch)| {
        if !ch.is_checked() || v.is_nan() {
            return true;
        }
        ch.low - tolerance <= v && v <= ch.high + tolerance
    })
}

/// Clamps bounded channels into range and wraps hue angles.
///
/// Returns the new coordinates and whether any clamp changed a value.
/// Wrapping a hue is not counted as a change.
pub fn clip_channels(coords: [f64; 3], channels: &[Channel; 3]) -> ([f64; 3], bool) {
    let mut out = coords;
    let mut clipped = false;
    for (v, ch) in out.iter_mut().zip(channels) {
        if ch.angle {
            *v = constrain_hue(*v);
            continue;
        }
        if !ch.bound || v.is_nan() {
            continue;
        }
        let c = v.clamp(ch.low, ch.high);
        if c != *v {
            *v = c;
            clipped = true;
        }
    }
    (out, clipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tint_spaces::cylinder::Hsl;
    use tint_core::Space;
    use tint_spaces::rgb::RGB_CHANNELS;

    #[test]
    fn test_tolerance_edge() {
        assert!(in_gamut([1.0, 0.0, 0.0], &RGB_CHANNELS, 0.0));
        assert!(!in_gamut([1.0 + 1e-6, 0.0, 0.0], &RGB_CHANNELS, 0.0));
        assert!(in_gamut([1.0 + 1e-6, 0.0, 0.0], &RGB_CHANNELS, DEFAULT_FIT_TOLERANCE));
        assert!(!in_gamut([-0.001, 0.0, 0.0], &RGB_CHANNELS, DEFAULT_FIT_TOLERANCE));
    }

    #[test]
    fn test_angles_and_nan_pass() {
        let hsl = Hsl.channels();
        assert!(in_gamut([-400.0, 0.5, 0.5], hsl, 0.0));
        assert!(in_gamut([f64::NAN, f64::NAN, 0.5], hsl, 0.0));
    }

    #[test]
    fn test_clip_reports_change() {
        let (c, changed) = clip_channels([2.0, 0.5, -0.5], &RGB_CHANNELS);
        assert_eq!(c, [1.0, 0.5, 0.0]);
        assert!(changed);

        let (c, changed) = clip_channels([0.2, 0.5, 0.7], &RGB_CHANNELS);
        assert_eq!(c, [0.2, 0.5, 0.7]);
        assert!(!changed);
    }

    #[test]
    fn test_clip_wraps_hue_silently() {
        let (c, changed) = clip_channels([-120.0, 0.5, 0.75], Hsl.channels());
        assert_eq!(c[0], 240.0);
        assert!(!changed);
    }

    #[test]
    fn test_clip_idempotent() {
        let (once, _) = clip_channels([1.7, -0.2, 0.4], &RGB_CHANNELS);
        let (twice, changed) = clip_channels(once, &RGB_CHANNELS);
        assert_eq!(once, twice);
        assert!(!changed);
    }

    #[test]
    fn test_clip_keeps_nan() {
        let (c, _) = clip_channels([f64::NAN, 2.0, 0.5], &RGB_CHANNELS);
        assert!(c[0].is_nan());
        assert_eq!(c[1], 1.0);
    }
}
