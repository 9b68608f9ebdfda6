//! Gamut mapping entry point: method selection and options.
//!
//! ```text
//! Color::fit(space, method, options)
//!     |
//!     +-- convert to space
//!     +-- in gamut (tolerance 0)?  -> done
//!     +-- method.strategy().fit()  -> coordinates in space
//!     +-- written back into the color's own space, normalized
//! ```
//!
//! | Method           | Strategy                        |
//! |------------------|---------------------------------|
//! | `clip`           | per-channel clamp               |
//! | `chroma-bisect`  | [`ChromaBisect::LCH`]           |
//! | `oklch-chroma`   | [`ChromaBisect::OKLCH`]         |
//! | `raytrace`       | [`RayTrace`]                    |
//! | `oklch-raytrace` | [`OklchRayTrace::OKLCH`]        |
//! | `lch-raytrace`   | [`OklchRayTrace::LCH`]          |
//! | `scale`          | [`Scale`]                       |

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::delta_e::DeltaE;
use crate::error::{ColorError, ColorResult};
use crate::gamut::{ChromaBisect, OklchRayTrace, RayTrace, Scale};

/// A gamut mapping algorithm.
///
/// `color` is already expressed in the target space and is out of gamut
/// there. The result must be in the same space and in gamut at tolerance 0.
pub trait GamutFit: Send + Sync {
    /// Registry name of the method.
    fn name(&self) -> &'static str;

    /// Maps `color` into its own space's gamut.
    fn fit(&self, color: &Color, options: &FitOptions) -> ColorResult<Color>;
}

/// Per-channel clipping as a strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct Clip;

impl GamutFit for Clip {
    fn name(&self) -> &'static str {
        "clip"
    }

    fn fit(&self, color: &Color, _options: &FitOptions) -> ColorResult<Color> {
        color.clip_in_place()
    }
}

/// Builtin gamut mapping methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FitMethod {
    /// Clamp each channel.
    Clip,
    /// Chroma bisection in CIE LCh with CIEDE2000.
    #[cfg_attr(feature = "serde", serde(alias = "lch-chroma"))]
    ChromaBisect,
    /// Chroma bisection in Oklch with Delta E OK.
    OklchChroma,
    /// Ray trace toward an achromatic anchor in a perceptual space.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "raytrace"))]
    RayTrace,
    /// Cube face tracing with chroma backoff in Oklch.
    #[cfg_attr(feature = "serde", serde(rename = "oklch-raytrace"))]
    OklchRayTrace,
    /// Cube face tracing with chroma backoff in CIE LCh.
    #[cfg_attr(feature = "serde", serde(rename = "lch-raytrace"))]
    LchRayTrace,
    /// Luminance preserving scale toward the cube.
    Scale,
}

impl FitMethod {
    /// Every builtin method.
    pub const ALL: [FitMethod; 7] = [
        FitMethod::Clip,
        FitMethod::ChromaBisect,
        FitMethod::OklchChroma,
        FitMethod::RayTrace,
        FitMethod::OklchRayTrace,
        FitMethod::LchRayTrace,
        FitMethod::Scale,
    ];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        self.strategy().name()
    }

    /// Strategy implementing the method.
    pub fn strategy(self) -> &'static dyn GamutFit {
        match self {
            Self::Clip => &Clip,
            Self::ChromaBisect => &ChromaBisect::LCH,
            Self::OklchChroma => &ChromaBisect::OKLCH,
            Self::RayTrace => &RayTrace,
            Self::OklchRayTrace => &OklchRayTrace::OKLCH,
            Self::LchRayTrace => &OklchRayTrace::LCH,
            Self::Scale => &Scale,
        }
    }
}

impl FromStr for FitMethod {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clip" => Ok(Self::Clip),
            "chroma-bisect" | "lch-chroma" => Ok(Self::ChromaBisect),
            "oklch-chroma" => Ok(Self::OklchChroma),
            "raytrace" => Ok(Self::RayTrace),
            "oklch-raytrace" => Ok(Self::OklchRayTrace),
            "lch-raytrace" => Ok(Self::LchRayTrace),
            "scale" => Ok(Self::Scale),
            _ => Err(ColorError::UnknownMethod { name: s.to_string() }),
        }
    }
}

impl fmt::Display for FitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tuning knobs shared by the fitters.
///
/// `None` means "the method's default". Fields a method does not read are
/// ignored.
///
/// ```rust
/// use tint_color::FitOptions;
///
/// let opts = FitOptions::default().pspace("oklab").adaptive(0.05).max_iterations(6);
/// assert_eq!(opts.max_iterations, 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FitOptions {
    /// Just noticeable difference for the bisection methods.
    pub jnd: Option<f64>,
    /// Bisection convergence width; derived from `jnd` when unset.
    pub epsilon: Option<f64>,
    /// Distance formula for the bisection methods.
    pub delta_e: Option<DeltaE>,
    /// Perceptual space for chroma reduction.
    pub pspace: Option<String>,
    /// Adaptive lightness strength for ray tracing and bisection; 0 keeps lightness.
    pub adaptive: f64,
    /// Ray trace correction rounds.
    pub max_iterations: usize,
    /// Number of cube traces for `oklch-raytrace` and `lch-raytrace` (1 to 3).
    pub traces: Option<usize>,
    /// Scale in the linear variant of the target.
    pub linear: Option<bool>,
    /// Zero negative channels before scaling.
    pub clip_negative: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            jnd: None,
            epsilon: None,
            delta_e: None,
            pspace: None,
            adaptive: 0.0,
            max_iterations: 4,
            traces: None,
            linear: None,
            clip_negative: false,
        }
    }
}

impl FitOptions {
    /// Sets the JND.
    pub fn jnd(mut self, jnd: f64) -> Self {
        self.jnd = Some(jnd);
        self
    }

    /// Sets the bisection epsilon.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Sets the Delta E formula.
    pub fn delta_e(mut self, de: DeltaE) -> Self {
        self.delta_e = Some(de);
        self
    }

    /// Sets the perceptual space.
    pub fn pspace(mut self, name: impl Into<String>) -> Self {
        self.pspace = Some(name.into());
        self
    }

    /// Sets the adaptive lightness strength.
    pub fn adaptive(mut self, adaptive: f64) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Sets the ray trace round count.
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the `oklch-raytrace` pass count.
    pub fn traces(mut self, n: usize) -> Self {
        self.traces = Some(n);
        self
    }

    /// Chooses linear or encoded scaling.
    pub fn linear(mut self, linear: bool) -> Self {
        self.linear = Some(linear);
        self
    }

    /// Zero negative channels before scaling.
    pub fn clip_negative(mut self, clip: bool) -> Self {
        self.clip_negative = clip;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for m in FitMethod::ALL {
            assert_eq!(m.name().parse::<FitMethod>().unwrap(), m);
        }
        assert_eq!("lch-chroma".parse::<FitMethod>().unwrap(), FitMethod::ChromaBisect);
        assert_eq!("lch-raytrace".parse::<FitMethod>().unwrap(), FitMethod::LchRayTrace);
        assert_eq!(FitMethod::LchRayTrace.to_string(), "lch-raytrace");
    }

    #[test]
    fn test_unknown_method() {
        let err = "minde".parse::<FitMethod>().unwrap_err();
        assert!(matches!(err, ColorError::UnknownMethod { ref name } if name == "minde"));
        assert_eq!(err.to_string(), "'minde' gamut mapping is not supported");
    }

    #[test]
    fn test_default_options() {
        let o = FitOptions::default();
        assert_eq!(o.max_iterations, 4);
        assert_eq!(o.adaptive, 0.0);
        assert!(o.pspace.is_none() && o.jnd.is_none());
    }
}
