//! The color space capability.
//!
//! A [`Space`] knows its channels and how to move coordinates one step up
//! or down its conversion chain (`to_base` / `from_base`). Everything else
//! (routing, gamut mapping) is built on this surface, so new spaces only
//! need to implement the trait and register.
//!
//! ```text
//! xyz-d65 ─┬─ srgb-linear ── srgb ── hsl
//!          │                      └─ hsv ── hwb
//!          ├─ oklab ── oklch
//!          └─ lab-d65 ── lch-d65
//! ```
//!
//! # Implementing a space
//!
//! ```rust
//! use tint_core::{Channel, Space, SpaceKind};
//!
//! #[derive(Debug)]
//! struct Doubled;
//!
//! static CHANNELS: [Channel; 3] = [
//!     Channel::unbounded("x", 0.0, 2.0),
//!     Channel::unbounded("y", 0.0, 2.0),
//!     Channel::unbounded("z", 0.0, 2.0),
//! ];
//!
//! impl Space for Doubled {
//!     fn name(&self) -> &'static str { "doubled" }
//!     fn base(&self) -> Option<&'static str> { Some("xyz-d65") }
//!     fn channels(&self) -> &[Channel; 3] { &CHANNELS }
//!     fn kind(&self) -> SpaceKind { SpaceKind::Xyz }
//!     fn to_base(&self, c: [f64; 3]) -> [f64; 3] { c.map(|v| v / 2.0) }
//!     fn from_base(&self, c: [f64; 3]) -> [f64; 3] { c.map(|v| v * 2.0) }
//! }
//!
//! assert_eq!(Doubled.from_base([0.5; 3]), [1.0; 3]);
//! assert!(!Doubled.is_polar());
//! ```

use std::fmt;

use crate::channel::Channel;
use crate::white::D65_XY;

/// Threshold under which chroma-like values count as achromatic.
pub const ACHROMATIC_THRESHOLD: f64 = 1e-4;

/// Family a space belongs to.
///
/// Gamut mapping dispatches on this: RGB-like families can be ray traced,
/// Lab/LCh families can serve as the perceptual space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpaceKind {
    /// RGB with a cube gamut.
    Rgb,
    /// Hue, saturation, lightness over an RGB base.
    Hsl,
    /// Hue, saturation, value over an RGB base.
    Hsv,
    /// Hue, whiteness, blackness over an HSV base.
    Hwb,
    /// Rectangular opponent space: lightness, a, b.
    Lab,
    /// Cylindrical opponent space: lightness, chroma, hue.
    Lch,
    /// CIE XYZ.
    Xyz,
}

impl SpaceKind {
    /// RGB or one of the cylindrical RGB re-expressions.
    pub fn is_rgb_like(self) -> bool {
        matches!(self, Self::Rgb | Self::Hsl | Self::Hsv | Self::Hwb)
    }

    /// Lab or LCh.
    pub fn is_perceptual(self) -> bool {
        matches!(self, Self::Lab | Self::Lch)
    }
}

/// Standard or high dynamic range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DynamicRange {
    /// Channel maxima at diffuse white.
    #[default]
    Sdr,
    /// Channel maxima above diffuse white.
    Hdr,
}

/// A color space as seen by conversion and gamut mapping.
///
/// Implementations are stateless and shared behind `Arc<dyn Space>`.
pub trait Space: Send + Sync + fmt::Debug {
    /// Registry name, e.g. `"srgb"`.
    fn name(&self) -> &'static str;

    /// Name of the space `to_base` converts into; `None` for the root.
    fn base(&self) -> Option<&'static str>;

    /// Channel descriptors, in coordinate order.
    fn channels(&self) -> &[Channel; 3];

    /// Family of the space.
    fn kind(&self) -> SpaceKind;

    /// Coordinates in this space to coordinates in [`base`](Self::base).
    fn to_base(&self, coords: [f64; 3]) -> [f64; 3];

    /// Coordinates in [`base`](Self::base) to coordinates in this space.
    fn from_base(&self, coords: [f64; 3]) -> [f64; 3];

    /// Whether a channel is a hue angle.
    fn is_polar(&self) -> bool {
        self.channels().iter().any(|c| c.angle)
    }

    /// Positions of the lightness, chroma-or-a and hue-or-b channels.
    fn indexes(&self) -> [usize; 3] {
        [0, 1, 2]
    }

    /// White point chromaticity.
    fn white(&self) -> [f64; 2] {
        D65_XY
    }

    /// Name of the linear-light variant, if there is one.
    fn linear(&self) -> Option<&'static str> {
        None
    }

    /// Space whose bounds decide gamut membership, if not this one.
    fn gamut_check(&self) -> Option<&'static str> {
        None
    }

    /// SDR or HDR.
    fn dynamic_range(&self) -> DynamicRange {
        DynamicRange::Sdr
    }

    /// Whether the coordinates describe a gray.
    fn is_achromatic(&self, coords: [f64; 3]) -> bool {
        let _ = coords;
        false
    }

    /// Position of the hue channel for polar spaces.
    fn hue_index(&self) -> Option<usize> {
        self.channels().iter().position(|c| c.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Cyl;

    static CYL: [Channel; 3] = [
        Channel::unbounded("l", 0.0, 1.0),
        Channel::unbounded("c", 0.0, 0.4),
        Channel::angle("h"),
    ];

    impl Space for Cyl {
        fn name(&self) -> &'static str {
            "cyl"
        }
        fn base(&self) -> Option<&'static str> {
            None
        }
        fn channels(&self) -> &[Channel; 3] {
            &CYL
        }
        fn kind(&self) -> SpaceKind {
            SpaceKind::Lch
        }
        fn to_base(&self, coords: [f64; 3]) -> [f64; 3] {
            coords
        }
        fn from_base(&self, coords: [f64; 3]) -> [f64; 3] {
            coords
        }
    }

    #[test]
    fn test_defaults() {
        assert!(Cyl.is_polar());
        assert_eq!(Cyl.hue_index(), Some(2));
        assert_eq!(Cyl.white(), D65_XY);
        assert_eq!(Cyl.dynamic_range(), DynamicRange::Sdr);
        assert!(Cyl.linear().is_none());
        assert!(!Cyl.is_achromatic([0.5, 0.0, 0.0]));
    }

    #[test]
    fn test_kind_families() {
        assert!(SpaceKind::Hwb.is_rgb_like());
        assert!(!SpaceKind::Lab.is_rgb_like());
        assert!(SpaceKind::Lch.is_perceptual());
    }
}
