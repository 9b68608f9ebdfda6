//! Cube face tracing with chroma backoff in Oklch or CIE LCh.
//!
//! Each pass traces the segment from the current color to its gray in the
//! linear RGB cube, jumps to the face it crosses, restores Oklch lightness
//! and hue, then pushes chroma part of the way back toward the original.
//! Later passes back off less:
//!
//! | passes | backoff factors    |
//! |--------|--------------------|
//! | 1      | 0.98               |
//! | 2      | 0.88, 0.98         |
//! | 3      | 0.9, 0.95, 0.98    |

use std::sync::Arc;

use tint_core::{xy_to_xyz, D65_XY};
use tint_math::geometry::raytrace_cube;
use tracing::trace;

use crate::color::Color;
use crate::error::{ColorError, ColorResult};
use crate::fit::{FitOptions, GamutFit};
use crate::gamut::CoercedRgb;

const DEFAULT_TRACES: usize = 3;

/// Chroma gap under which no backoff is applied.
const BACKOFF_GAP: f64 = 0.05;

fn backoff_factors(traces: usize) -> Option<&'static [f64]> {
    match traces {
        1 => Some(&[0.98][..]),
        2 => Some(&[0.88, 0.98][..]),
        3 => Some(&[0.9, 0.95, 0.98][..]),
        _ => None,
    }
}

/// Moves chroma `c` back toward `original` by `factor` of the gap.
fn backoff(c: f64, original: f64, factor: f64) -> f64 {
    let d = original - c;
    if d > BACKOFF_GAP { original - d * factor } else { c }
}

/// Cube tracing preset: polar space and its lightness range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OklchRayTrace {
    /// Method name.
    pub name: &'static str,
    /// Polar space holding lightness and hue.
    pub space: &'static str,
    /// Lightness of white.
    pub max_lightness: f64,
    /// Lightness of black.
    pub min_lightness: f64,
}

impl OklchRayTrace {
    /// Oklch, lightness 0 to 1.
    pub const OKLCH: Self = Self {
        name: "oklch-raytrace",
        space: "oklch",
        max_lightness: 1.0,
        min_lightness: 0.0,
    };

    /// CIE LCh D65, lightness 0 to 100.
    pub const LCH: Self = Self {
        name: "lch-raytrace",
        space: "lch-d65",
        max_lightness: 100.0,
        min_lightness: 0.0,
    };
}

impl Default for OklchRayTrace {
    fn default() -> Self {
        Self::OKLCH
    }
}

impl GamutFit for OklchRayTrace {
    fn name(&self) -> &'static str {
        self.name
    }

    fn fit(&self, color: &Color, options: &FitOptions) -> ColorResult<Color> {
        let traces = options.traces.unwrap_or(DEFAULT_TRACES);
        let factors = backoff_factors(traces).ok_or_else(|| ColorError::InvalidOption {
            name: "traces",
            reason: format!("must be 1, 2 or 3, got {traces}"),
        })?;

        let registry = Arc::clone(color.registry());
        let target = Arc::clone(color.space());
        let mut space = CoercedRgb::rgb_view(&target)?;
        if let Some(linear) = space.linear().filter(|name| registry.contains(name)) {
            space = registry.get(linear)?;
        }
        let polar = registry.get(self.space)?;

        let m = color.convert_to(&polar)?.coords();
        let [li, ci, hi] = polar.indexes();
        let lightness = m[li];

        let result = if lightness >= self.max_lightness || (lightness - self.max_lightness).abs() <= 1e-6 {
            trace!("lightness at or above white");
            let xyz = registry.get("xyz-d65")?;
            color.sibling(xyz, xy_to_xyz(D65_XY)).convert_to(&target)?
        } else if lightness <= self.min_lightness {
            trace!("lightness at or below black");
            let xyz = registry.get("xyz-d65")?;
            color.sibling(xyz, [0.0; 3]).convert_to(&target)?
        } else {
            let mut gray = m;
            gray[ci] = 0.0;
            let achroma = registry.convert_between(&polar, &space, gray)?;
            let mut rgb = registry.convert_between(&polar, &space, m)?;

            for (pass, &factor) in factors.iter().enumerate() {
                let Some(hit) = raytrace_cube([1.0; 3], rgb, achroma) else {
                    trace!(pass, "inside the cube");
                    break;
                };
                let mut p = registry.convert_between(&space, &polar, hit.point)?;
                p[li] = m[li];
                p[ci] = backoff(p[ci], m[ci], factor);
                p[hi] = m[hi];
                rgb = registry.convert_between(&polar, &space, p)?;
            }
            color.sibling(space, rgb.map(|x| x.clamp(0.0, 1.0))).convert_to(&target)?
        };

        result.clip_in_place()
    }
}
