//! Gamut mapping by ray tracing toward an achromatic anchor.
//!
//! Works in the (preferably linear) RGB cube of the target. A ray is cast
//! from the gray with the color's lightness toward the color; where it
//! leaves the cube is a first estimate. Each later round moves that
//! estimate back onto the constant lightness and hue line in the
//! perceptual space and traces again:
//!
//! ```text
//!   pspace                 rgb cube
//!   ------                 --------
//!   color ---------------> trial ----+
//!                                    |  raytrace_box(anchor, trial)
//!   correct L and h <----- hit <-----+
//!        |
//!        +---------------> trial (next round)
//! ```
//!
//! HSL, HSV and HWB targets are traced through their [`CoercedRgb`] cube.
//! HDR targets use a box whose corner is the channel maximum in linear
//! light.

use std::sync::Arc;

use tint_core::DynamicRange;
use tint_math::geometry::{project_onto, raytrace_box};
use tint_math::scalar::{polar_to_rect, rect_to_polar};
use tracing::{debug, trace};

use crate::color::Color;
use crate::error::{ColorError, ColorResult};
use crate::fit::{FitOptions, GamutFit};
use crate::gamut::tools::adaptive_hue_independent;
use crate::gamut::CoercedRgb;

/// Default perceptual space.
pub const PSPACE: &str = "oklch";

/// Distance from the cube surface inside which the anchor is not moved.
const ANCHOR_MARGIN: f64 = 1e-6;

/// Ray trace gamut mapping.
#[derive(Debug, Default, Clone, Copy)]
pub struct RayTrace;

impl GamutFit for RayTrace {
    fn name(&self) -> &'static str {
        "raytrace"
    }

    fn fit(&self, color: &Color, options: &FitOptions) -> ColorResult<Color> {
        let registry = Arc::clone(color.registry());
        let pspace = registry.get(options.pspace.as_deref().unwrap_or(PSPACE))?;
        if !pspace.kind().is_perceptual() {
            return Err(ColorError::InvalidOption {
                name: "pspace",
                reason: format!("'{}' is not a Lab or LCh space", pspace.name()),
            });
        }
        let adaptive = options.adaptive;
        if !adaptive.is_finite() || adaptive < 0.0 {
            return Err(ColorError::InvalidOption {
                name: "adaptive",
                reason: format!("must be a finite value >= 0, got {adaptive}"),
            });
        }
        let polar = pspace.is_polar();
        let target = Arc::clone(color.space());
        let cube = CoercedRgb::rgb_view(&target)?;

        let mut bmax = [1.0; 3];
        let mut space = Arc::clone(&cube);
        if let Some(linear) = cube.linear().filter(|name| registry.contains(name)) {
            let linear = registry.get(linear)?;
            if cube.dynamic_range() == DynamicRange::Hdr {
                let ch = cube.channels();
                let highs = [ch[0].high, ch[1].high, ch[2].high];
                bmax = registry.convert_between(&cube, &linear, highs)?;
            }
            space = linear;
        }
        debug!(gamut = target.name(), work = space.name(), pspace = pspace.name(), "raytrace");

        let m = color.convert_to(&pspace)?.coords();
        let [li, ci, hi] = pspace.indexes();
        let light = m[li];
        let (chroma, hue, ab) = if polar {
            (m[ci], m[hi], polar_to_rect(m[ci], m[hi]))
        } else {
            let (c, h) = rect_to_polar(m[ci], m[hi]);
            (c, h, (m[ci], m[hi]))
        };
        let mut achroma = m;
        achroma[ci] = 0.0;
        if !polar {
            achroma[hi] = 0.0;
        }

        let alight = if adaptive > 0.0 {
            let max_light = registry.convert_between(&space, &pspace, [1.0; 3])?[li];
            let l = adaptive_hue_independent(light / max_light, chroma.max(0.0) / max_light, adaptive) * max_light;
            achroma[li] = l;
            l
        } else {
            light
        };

        // mean of the gray's channels absorbs small non-neutral drift
        let gray = registry.convert_between(&pspace, &space, achroma)?;
        let point = gray.iter().sum::<f64>() / 3.0;
        let bmx = bmax[0];

        let result = if point >= bmx {
            trace!("anchor above the cube, white");
            bmax
        } else if point <= 0.0 {
            trace!("anchor below the cube, black");
            [0.0; 3]
        } else {
            let mut anchor = [point; 3];
            let mut rgb = registry.convert_between(&pspace, &space, m)?;
            let start = [light, ab.0, ab.1];
            let end = [alight, 0.0, 0.0];
            let low = ANCHOR_MARGIN;
            let high = bmx - ANCHOR_MARGIN;

            for i in 0..options.max_iterations {
                if i > 0 {
                    let mut p = registry.convert_between(&space, &pspace, rgb)?;
                    if adaptive > 0.0 {
                        let (a, b) = if polar {
                            polar_to_rect(p[ci], p[hi])
                        } else {
                            (p[ci], p[hi])
                        };
                        let [l2, a2, b2] = project_onto([p[li], a, b], start, end);
                        p[li] = l2;
                        if polar {
                            let (c2, h2) = rect_to_polar(a2, b2);
                            p[ci] = c2;
                            p[hi] = h2;
                        } else {
                            p[ci] = a2;
                            p[hi] = b2;
                        }
                    } else {
                        p[li] = alight;
                        if polar {
                            p[hi] = hue;
                        } else {
                            let (c2, _) = rect_to_polar(p[ci], p[hi]);
                            let (a2, b2) = polar_to_rect(c2, hue);
                            p[ci] = a2;
                            p[hi] = b2;
                        }
                    }
                    rgb = registry.convert_between(&pspace, &space, p)?;
                }

                let hit = raytrace_box(anchor, rgb, [0.0; 3], bmax);

                if i > 0 && rgb.iter().all(|&x| low < x && x < high) {
                    anchor = rgb;
                }

                match hit {
                    Some(p) => rgb = p,
                    None => {
                        trace!(round = i, "no intersection");
                        break;
                    }
                }
            }
            rgb.map(|x| x.clamp(0.0, bmx))
        };

        // floating point noise from the trip back out of the cube
        color.sibling(space, result).convert_to(&target)?.clip_in_place()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fit(space: &str, coords: [f64; 3], target: &str, options: &FitOptions) -> Color {
        let c = Color::new(space, coords, 1.0).unwrap().convert(target).unwrap();
        RayTrace.fit(&c, options).unwrap()
    }

    #[test]
    fn test_preserves_lightness_and_hue() {
        let out = fit("oklch", [0.3, 0.4, 160.0], "srgb", &FitOptions::default());
        assert!(out.in_gamut(0.0).unwrap());
        let lch = out.convert("oklch").unwrap();
        assert_relative_eq!(lch.get(0), 0.3, epsilon = 1e-3);
        assert_relative_eq!(lch.get(2), 160.0, epsilon = 0.5);
        assert!(lch.get(1) < 0.4);
    }

    #[test]
    fn test_light_blue_lands_in_gamut() {
        let out = fit("oklch", [0.9, 0.4, 270.0], "srgb", &FitOptions::default());
        assert!(out.in_gamut(0.0).unwrap());
        let lch = out.convert("oklch").unwrap();
        assert_relative_eq!(lch.get(0), 0.9, epsilon = 1e-3);
    }

    #[test]
    fn test_white_and_black_anchors() {
        let out = fit("oklch", [1.1, 0.2, 30.0], "srgb", &FitOptions::default());
        for v in out.coords() {
            assert_relative_eq!(v, 1.0, epsilon = 1e-9);
        }
        let out = fit("oklch", [-0.1, 0.2, 30.0], "srgb", &FitOptions::default());
        assert_eq!(out.coords(), [0.0; 3]);
    }

    #[test]
    fn test_adaptive_in_gamut() {
        let opts = FitOptions::default().adaptive(0.05);
        let out = fit("oklch", [0.8, 0.35, 140.0], "display-p3", &opts);
        assert!(out.in_gamut(0.0).unwrap());
    }

    #[test]
    fn test_rectangular_pspace() {
        let opts = FitOptions::default().pspace("oklab");
        let out = fit("oklch", [0.6, 0.35, 20.0], "srgb", &opts);
        assert!(out.in_gamut(0.0).unwrap());
        let lch = out.convert("oklch").unwrap();
        assert_relative_eq!(lch.get(2), 20.0, epsilon = 0.5);
    }

    #[test]
    fn test_non_rgb_target_rejected() {
        let c = Color::new("oklab", [0.5, 0.5, 0.5], 1.0).unwrap();
        let err = RayTrace.fit(&c, &FitOptions::default()).unwrap_err();
        assert!(matches!(err, ColorError::Space(tint_core::SpaceError::NotRgb { .. })));
    }

    #[test]
    fn test_non_perceptual_pspace_rejected() {
        let c = Color::new("srgb", [1.5, 0.0, 0.0], 1.0).unwrap();
        let err = RayTrace.fit(&c, &FitOptions::default().pspace("xyz-d65")).unwrap_err();
        assert!(matches!(err, ColorError::InvalidOption { name: "pspace", .. }));
    }
}
