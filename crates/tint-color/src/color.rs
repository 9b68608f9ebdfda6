//! The [`Color`] facade.
//!
//! A color is a space handle, three coordinates and an alpha. Operations
//! that change space return a new `Color`; the registry used for routing
//! travels with it.
//!
//! # Example
//!
//! ```rust
//! use tint_color::{Color, FitMethod, FitOptions};
//!
//! let c = Color::new("srgb", [2.0, 0.5, 0.5], 1.0).unwrap();
//! assert!(!c.in_gamut(0.0).unwrap());
//!
//! let fitted = c.fit("srgb", FitMethod::Clip, &FitOptions::default()).unwrap();
//! assert_eq!(fitted.coords(), [1.0, 0.5, 0.5]);
//! ```

use std::fmt;
use std::sync::Arc;

use tint_math::scalar::no_nans;
use tint_spaces::{SpaceRef, SpaceRegistry};

use crate::delta_e::DeltaE;
use crate::error::{ColorError, ColorResult};
use crate::fit::{FitMethod, FitOptions};
use crate::gamut;

/// A color in one registered space.
#[derive(Debug, Clone)]
pub struct Color {
    registry: Arc<SpaceRegistry>,
    space: SpaceRef,
    coords: [f64; 3],
    alpha: f64,
}

impl Color {
    /// Color in a builtin space.
    pub fn new(space: &str, coords: [f64; 3], alpha: f64) -> ColorResult<Self> {
        Self::with_registry(SpaceRegistry::builtin(), space, coords, alpha)
    }

    /// Color resolved against an explicit registry.
    pub fn with_registry(registry: Arc<SpaceRegistry>, space: &str, coords: [f64; 3], alpha: f64) -> ColorResult<Self> {
        let space = registry.get(space)?;
        Ok(Self {
            registry,
            space,
            coords,
            alpha,
        })
    }

    /// Same registry and alpha, different space and coordinates.
    ///
    /// `space` only needs its bases registered, which lets fitters work in
    /// synthetic spaces such as [`CoercedRgb`](crate::gamut::CoercedRgb).
    pub(crate) fn sibling(&self, space: SpaceRef, coords: [f64; 3]) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            space,
            coords,
            alpha: self.alpha,
        }
    }

    /// Registry used for conversions.
    pub fn registry(&self) -> &Arc<SpaceRegistry> {
        &self.registry
    }

    /// Space handle.
    pub fn space(&self) -> &SpaceRef {
        &self.space
    }

    /// Space name.
    pub fn space_name(&self) -> &'static str {
        self.space.name()
    }

    /// Channel values.
    pub fn coords(&self) -> [f64; 3] {
        self.coords
    }

    /// Alpha.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Channel values followed by alpha.
    pub fn coordinates(&self) -> [f64; 4] {
        let [a, b, c] = self.coords;
        [a, b, c, self.alpha]
    }

    /// One channel value.
    ///
    /// # Panics
    ///
    /// If `index > 2`.
    pub fn get(&self, index: usize) -> f64 {
        self.coords[index]
    }

    /// Sets one channel value.
    ///
    /// # Panics
    ///
    /// If `index > 2`.
    pub fn set(&mut self, index: usize, value: f64) -> &mut Self {
        self.coords[index] = value;
        self
    }

    /// One channel value, `None` past the last channel.
    pub fn try_get(&self, index: usize) -> Option<f64> {
        self.coords.get(index).copied()
    }

    /// Sets one channel value, failing with [`ColorError::Index`] past the last channel.
    pub fn try_set(&mut self, index: usize, value: f64) -> ColorResult<&mut Self> {
        let slot = self.coords.get_mut(index).ok_or(ColorError::Index { index })?;
        *slot = value;
        Ok(self)
    }

    /// Replaces all channel values.
    pub fn set_coords(&mut self, coords: [f64; 3]) -> &mut Self {
        self.coords = coords;
        self
    }

    /// Sets alpha.
    pub fn set_alpha(&mut self, alpha: f64) -> &mut Self {
        self.alpha = alpha;
        self
    }

    /// Converts to the space registered as `space`.
    pub fn convert(&self, space: &str) -> ColorResult<Color> {
        let target = self.registry.get(space)?;
        self.convert_to(&target)
    }

    /// Converts to `space`. Undefined (NaN) channels are read as 0.
    ///
    /// The result is not normalized, so a gray keeps a numeric hue.
    pub fn convert_to(&self, space: &SpaceRef) -> ColorResult<Color> {
        if space.name() == self.space.name() {
            return Ok(self.sibling(Arc::clone(space), self.coords));
        }
        let coords = self.registry.convert_between(&self.space, space, no_nans(self.coords))?;
        Ok(self.sibling(Arc::clone(space), coords))
    }

    /// Takes the value of `other`, expressed in this color's space.
    pub fn update(&mut self, other: &Color) -> ColorResult<&mut Self> {
        let converted = other.convert_to(&self.space)?;
        self.coords = converted.coords;
        self.alpha = other.alpha;
        Ok(self)
    }

    /// Marks the hue of an achromatic polar color as undefined (NaN).
    pub fn normalize(&mut self) -> &mut Self {
        if let Some(h) = self.space.hue_index() {
            if self.is_achromatic() {
                self.coords[h] = f64::NAN;
            }
        }
        self
    }

    /// Whether the color is a gray in its own space.
    pub fn is_achromatic(&self) -> bool {
        self.space.is_achromatic(no_nans(self.coords))
    }

    /// Gamut membership in the color's own space.
    pub fn in_gamut(&self, tolerance: f64) -> ColorResult<bool> {
        self.in_gamut_of(self.space_name(), tolerance)
    }

    /// Gamut membership in `space`.
    ///
    /// Spaces with a gamut-check space (HSL, HSV, HWB) are verified there.
    pub fn in_gamut_of(&self, space: &str, tolerance: f64) -> ColorResult<bool> {
        let target = self.registry.get(space)?;
        let mut check = self.convert_to(&target)?;
        if let Some(name) = target.gamut_check() {
            check = check.convert(name)?;
        }
        Ok(gamut::in_gamut(check.coords, check.space.channels(), tolerance))
    }

    /// Clips the color into the gamut of `space`, keeping its own space.
    pub fn clip(&self, space: &str) -> ColorResult<Color> {
        let target = self.registry.get(space)?;
        let clipped = self.convert_to(&target)?.clip_in_place()?;
        self.adopt(&clipped)
    }

    /// Clips in the color's own space.
    pub(crate) fn clip_in_place(&self) -> ColorResult<Color> {
        let mut out = self.clone();
        if let Some(name) = self.space.gamut_check() {
            let check = self.convert(name)?;
            if !gamut::in_gamut(check.coords, check.space.channels(), 0.0) {
                let (coords, _) = gamut::clip_channels(check.coords, check.space.channels());
                out.update(&check.sibling(Arc::clone(&check.space), coords))?;
            }
        }
        let (coords, _) = gamut::clip_channels(out.coords, out.space.channels());
        out.coords = coords;
        Ok(out)
    }

    /// Gamut maps into `space` and returns the result in this color's space.
    pub fn fit(&self, space: &str, method: FitMethod, options: &FitOptions) -> ColorResult<Color> {
        let fitted = self.fit_in(space, method, options)?;
        self.adopt(&fitted)
    }

    /// Gamut maps into `space` and returns the coordinates there.
    pub fn fit_coords(&self, space: &str, method: FitMethod, options: &FitOptions) -> ColorResult<[f64; 3]> {
        Ok(self.fit_in(space, method, options)?.coords)
    }

    fn fit_in(&self, space: &str, method: FitMethod, options: &FitOptions) -> ColorResult<Color> {
        let target = self.registry.get(space)?;
        let mapped = self.convert_to(&target)?;
        if method == FitMethod::Clip {
            return mapped.clip_in_place();
        }
        if mapped.in_gamut(0.0)? {
            return Ok(mapped);
        }
        method.strategy().fit(&mapped, options)
    }

    // Result of a gamut operation written back into this color's space.
    fn adopt(&self, result: &Color) -> ColorResult<Color> {
        let mut out = self.clone();
        out.update(result)?;
        out.normalize();
        Ok(out)
    }

    /// Perceptual distance to `other`.
    pub fn delta_e(&self, other: &Color, method: DeltaE) -> ColorResult<f64> {
        method.distance(self, other)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_channel = |v: f64| {
            if v.is_nan() {
                "none".to_string()
            } else {
                format!("{}", (v * 1e6).round() / 1e6)
            }
        };
        write!(
            f,
            "{}({} {} {}",
            self.space_name(),
            fmt_channel(self.coords[0]),
            fmt_channel(self.coords[1]),
            fmt_channel(self.coords[2])
        )?;
        if self.alpha < 1.0 {
            write!(f, " / {}", fmt_channel(self.alpha))?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unknown_space() {
        assert!(Color::new("cmyk", [0.0; 3], 1.0).is_err());
    }

    #[test]
    fn test_checked_channel_access() {
        let mut c = Color::new("srgb", [0.1, 0.2, 0.3], 1.0).unwrap();
        assert_eq!(c.try_get(2), Some(0.3));
        assert_eq!(c.try_get(3), None);
        c.try_set(1, 0.5).unwrap();
        assert_eq!(c.get(1), 0.5);
        let err = c.try_set(3, 0.5).unwrap_err();
        assert!(matches!(err, ColorError::Index { index: 3 }));
        assert_eq!(c.coords(), [0.1, 0.5, 0.3]);
    }

    #[test]
    fn test_convert_reads_nan_as_zero() {
        let c = Color::new("oklch", [0.5, 0.0, f64::NAN], 1.0).unwrap();
        let lab = c.convert("oklab").unwrap();
        assert_relative_eq!(lab.get(0), 0.5);
        assert_eq!(lab.get(1), 0.0);
    }

    #[test]
    fn test_same_space_keeps_nan() {
        let c = Color::new("oklch", [0.5, 0.0, f64::NAN], 1.0).unwrap();
        assert!(c.convert("oklch").unwrap().get(2).is_nan());
    }

    #[test]
    fn test_normalize_gray_hue() {
        let mut c = Color::new("srgb", [0.5, 0.5, 0.5], 1.0).unwrap().convert("oklch").unwrap();
        assert!(!c.get(2).is_nan());
        c.normalize();
        assert!(c.get(2).is_nan());
        assert!(c.is_achromatic());
    }

    #[test]
    fn test_update_and_alpha() {
        let mut c = Color::new("srgb", [0.0; 3], 1.0).unwrap();
        let other = Color::new("srgb-linear", [1.0, 1.0, 1.0], 0.5).unwrap();
        c.update(&other).unwrap();
        assert_relative_eq!(c.get(0), 1.0, epsilon = 1e-12);
        assert_eq!(c.coordinates()[3], 0.5);
    }

    #[test]
    fn test_in_gamut_through_check_space() {
        let c = Color::new("hsl", [30.0, 0.5, 0.5], 1.0).unwrap();
        assert!(c.in_gamut(0.0).unwrap());
        let c = Color::new("srgb", [1.2, 0.5, 0.5], 1.0).unwrap();
        assert!(!c.in_gamut_of("hsl", 0.0).unwrap());
    }

    #[test]
    fn test_display() {
        let c = Color::new("srgb", [1.0, 0.5, 0.25], 0.5).unwrap();
        assert_eq!(c.to_string(), "srgb(1 0.5 0.25 / 0.5)");
        let mut g = Color::new("oklch", [0.5, 0.0, 0.0], 1.0).unwrap();
        g.normalize();
        assert_eq!(g.to_string(), "oklch(0.5 0 none)");
    }
}
