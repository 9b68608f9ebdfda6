//! Luminance preserving scale into the RGB cube.
//!
//! One affine rescale of all three channels, then a luminance fix:
//!
//! ```text
//! lo = min(min(c), 0)      hi = max(max(c), high)
//! c' = (c - lo) / (hi - lo) * high
//! Y' > Y  =>  XYZ' *= Y / Y'
//! ```

use std::sync::Arc;

use tint_core::{xy_to_xyz, D65_XY};
use tracing::trace;

use crate::color::Color;
use crate::error::ColorResult;
use crate::fit::{FitOptions, GamutFit};
use crate::gamut::CoercedRgb;

const XYZ: &str = "xyz-d65";

/// Scale gamut mapping.
#[derive(Debug, Default, Clone, Copy)]
pub struct Scale;

impl GamutFit for Scale {
    fn name(&self) -> &'static str {
        "scale"
    }

    fn fit(&self, color: &Color, options: &FitOptions) -> ColorResult<Color> {
        let registry = Arc::clone(color.registry());
        let target = Arc::clone(color.space());
        let mut space = CoercedRgb::rgb_view(&target)?;
        if options.linear.unwrap_or(true) {
            if let Some(linear) = space.linear().filter(|name| registry.contains(name)) {
                space = registry.get(linear)?;
            }
        }
        let xyz = registry.get(XYZ)?;
        let white_y = xy_to_xyz(D65_XY)[1];
        let orig_y = color.convert_to(&xyz)?.coords()[1].clamp(0.0, white_y);

        let high = space.channels()[0].high;
        let mut rgb = color.convert_to(&space)?.coords();
        if options.clip_negative {
            rgb = rgb.map(|v| v.max(0.0));
        }
        let mn = rgb[0].min(rgb[1]).min(rgb[2]);
        let mx = rgb[0].max(rgb[1]).max(rgb[2]);
        let lo = mn.min(0.0);
        let hi = mx.max(high);
        let scaled = rgb.map(|v| (v - lo) / (hi - lo) * high);

        let mut xyz_coords = registry.convert_between(&space, &xyz, scaled)?;
        if xyz_coords[1] > orig_y {
            let k = orig_y / xyz_coords[1];
            trace!(factor = k, "restoring luminance");
            xyz_coords = xyz_coords.map(|v| v * k);
        }

        color.sibling(xyz, xyz_coords).convert_to(&target)?.clip_in_place()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scale_in_gamut_and_not_brighter() {
        let c = Color::new("srgb", [1.3, 0.2, -0.1], 1.0).unwrap();
        let out = Scale.fit(&c, &FitOptions::default()).unwrap();
        assert!(out.in_gamut(0.0).unwrap());
        let y0 = c.convert("xyz-d65").unwrap().get(1);
        let y1 = out.convert("xyz-d65").unwrap().get(1);
        assert!(y1 <= y0 + 1e-9);
    }

    #[test]
    fn test_scale_keeps_channel_order() {
        let c = Color::new("srgb-linear", [1.5, 0.5, 0.25], 1.0).unwrap();
        let out = Scale.fit(&c, &FitOptions::default().clip_negative(true)).unwrap();
        let [r, g, b] = out.coords();
        assert!(r > g && g > b);
        assert_relative_eq!(r / g, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_scale_encoded() {
        let c = Color::new("display-p3", [1.2, 0.9, -0.2], 1.0).unwrap();
        let out = Scale.fit(&c, &FitOptions::default().linear(false)).unwrap();
        assert!(out.in_gamut(0.0).unwrap());
    }
}
