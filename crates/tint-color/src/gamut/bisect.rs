//! Chroma reduction by bisection (MINDE).
//!
//! Holds lightness and hue fixed in a perceptual space and searches the
//! largest chroma whose clipped version is within a just noticeable
//! difference of the unclipped one:
//!
//! ```text
//! extremes      SDR and L >= white?           -> white, done
//!               L <= black?                   -> black, done
//! floor check   chroma 0 out of gamut?        -> clip, done
//! jnd check     delta_e(color, clip) < jnd?   -> clip, done
//! bisect        low = 0, high = chroma
//!               mid in gamut            -> low = mid
//!               delta_e(mid, clip) - jnd < eps -> low = mid
//!               otherwise               -> high = mid
//! done          clip(mid)
//! ```
//!
//! With `adaptive` lightness the search runs over `t` in `[0, 1]` along the
//! line from a gray anchor to the color, moving lightness and chroma
//! together. The anchor lightness comes from
//! [`adaptive_hue_independent`](super::adaptive_hue_independent), so very
//! light or dark saturated colors trade some lightness for chroma. The
//! extreme lightness exits are skipped in that mode.
//!
//! The search assumes the distance to the clip grows with chroma. That
//! holds for the builtin spaces but is not proven in general.

use std::sync::Arc;

use tint_core::{xy_to_xyz, DynamicRange, D65_XY};
use tint_math::scalar::{lerp, polar_to_rect, rect_to_polar};
use tracing::trace;

use crate::color::Color;
use crate::delta_e::DeltaE;
use crate::error::{ColorError, ColorResult};
use crate::fit::{FitOptions, GamutFit};
use crate::gamut::tools::adaptive_hue_independent;

/// Loop width used when the JND is 0, and for the adaptive search.
const MIN_CONVERGENCE: f64 = 0.0001;

const XYZ: &str = "xyz-d65";

/// Bisection preset: perceptual space, distance formula and JND.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromaBisect {
    /// Method name.
    pub name: &'static str,
    /// Default perceptual space.
    pub pspace: &'static str,
    /// Default distance formula.
    pub delta_e: DeltaE,
    /// Default just noticeable difference.
    pub jnd: f64,
}

impl ChromaBisect {
    /// CIE LCh with CIEDE2000, JND 2.
    pub const LCH: Self = Self {
        name: "chroma-bisect",
        pspace: "lch-d65",
        delta_e: DeltaE::Ciede2000,
        jnd: 2.0,
    };

    /// Oklch with Delta E OK, JND 0.02.
    pub const OKLCH: Self = Self {
        name: "oklch-chroma",
        pspace: "oklch",
        delta_e: DeltaE::Ok,
        jnd: 0.02,
    };
}

/// Convergence width two decades below `jnd` (2.0 -> 0.01, 0.02 -> 0.0001).
pub fn epsilon_for(jnd: f64) -> f64 {
    if jnd <= 0.0 {
        return MIN_CONVERGENCE;
    }
    10f64.powi(jnd.log10().floor() as i32 - 2)
}

impl GamutFit for ChromaBisect {
    fn name(&self) -> &'static str {
        self.name
    }

    fn fit(&self, color: &Color, options: &FitOptions) -> ColorResult<Color> {
        let jnd = options.jnd.unwrap_or(self.jnd);
        if !jnd.is_finite() || jnd < 0.0 {
            return Err(ColorError::InvalidOption {
                name: "jnd",
                reason: format!("must be a finite value >= 0, got {jnd}"),
            });
        }
        let epsilon = options.epsilon.unwrap_or_else(|| epsilon_for(jnd));
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ColorError::InvalidOption {
                name: "epsilon",
                reason: format!("must be a finite value > 0, got {epsilon}"),
            });
        }
        let adaptive = options.adaptive;
        if !adaptive.is_finite() || adaptive < 0.0 {
            return Err(ColorError::InvalidOption {
                name: "adaptive",
                reason: format!("must be a finite value >= 0, got {adaptive}"),
            });
        }
        let de = options.delta_e.unwrap_or(self.delta_e);

        let registry = Arc::clone(color.registry());
        let pspace = registry.get(options.pspace.as_deref().unwrap_or(self.pspace))?;
        if !pspace.kind().is_perceptual() {
            return Err(ColorError::InvalidOption {
                name: "pspace",
                reason: format!("'{}' is not a Lab or LCh space", pspace.name()),
            });
        }
        let target = Arc::clone(color.space());
        let xyz = registry.get(XYZ)?;
        let white = xy_to_xyz(D65_XY);

        let mapcolor = color.convert_to(&pspace)?;
        let [li, ci, hi] = pspace.indexes();
        let polar = pspace.is_polar();
        let base = mapcolor.coords();
        let light = base[li];
        let (chroma, hue) = if polar {
            (base[ci], base[hi])
        } else {
            rect_to_polar(base[ci], base[hi])
        };
        let max_light = registry.convert_between(&xyz, &pspace, white)?[li];

        if adaptive == 0.0 {
            let sdr = target.dynamic_range() == DynamicRange::Sdr;
            if sdr && (light >= max_light || (light - max_light).abs() <= 1e-6) {
                trace!(method = self.name, "lightness at or above white");
                return color.sibling(xyz, white).convert_to(&target)?.clip_in_place();
            }
            let min_light = registry.convert_between(&xyz, &pspace, [0.0; 3])?[li];
            if light <= min_light {
                trace!(method = self.name, "lightness at or below black");
                return color.sibling(xyz, [0.0; 3]).convert_to(&target)?.clip_in_place();
            }
        }

        // Gray anchor lightness; the original lightness when not adaptive.
        let alight = if adaptive > 0.0 {
            adaptive_hue_independent(light / max_light, chroma.max(0.0) / max_light, adaptive) * max_light
        } else {
            light
        };
        let with_chroma = |l: f64, c: f64| {
            let mut coords = base;
            coords[li] = l;
            if polar {
                coords[ci] = c;
            } else {
                let (a, b) = polar_to_rect(c, hue);
                coords[ci] = a;
                coords[hi] = b;
            }
            mapcolor.sibling(Arc::clone(&pspace), coords)
        };
        // Search parameter: chroma itself, or the position on the anchor line.
        let (high0, width) = if adaptive > 0.0 { (1.0, MIN_CONVERGENCE) } else { (chroma, epsilon) };
        let trial_at = |t: f64| {
            if adaptive > 0.0 {
                with_chroma(lerp(alight, light, t), lerp(0.0, chroma, t))
            } else {
                with_chroma(light, t)
            }
        };

        let floor = trial_at(0.0).convert_to(&target)?;
        if !floor.in_gamut(0.0)? {
            trace!(method = self.name, "achromatic color out of gamut, clipping");
            return floor.clip_in_place();
        }

        let clipped = color.clip_in_place()?;
        if de.distance(&mapcolor, &clipped)? < jnd {
            trace!(method = self.name, "clip within jnd");
            return Ok(clipped);
        }

        let mut low = 0.0;
        let mut high = high0;
        let mut steps = 0u32;
        while high - low > width {
            steps += 1;
            let mid = (low + high) * 0.5;
            let trial = trial_at(mid);
            let in_target = trial.convert_to(&target)?;
            if in_target.in_gamut(0.0)? {
                low = mid;
                continue;
            }
            let clip = in_target.clip_in_place()?;
            if de.distance(&trial, &clip)? - jnd < epsilon {
                low = mid;
            } else {
                high = mid;
            }
        }
        trace!(method = self.name, steps, at = (low + high) * 0.5, "bisection done");

        trial_at((low + high) * 0.5).convert_to(&target)?.clip_in_place()
    }
}
