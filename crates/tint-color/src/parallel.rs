//! Batch gamut mapping.
//!
//! With the `parallel` feature (on by default) colors are fitted on the
//! rayon thread pool; without it the same API runs sequentially. Every
//! color is fitted independently, so results match the sequential order.
//!
//! # Example
//!
//! ```rust
//! use tint_color::{fit_all, Color, FitMethod, FitOptions};
//!
//! let colors: Vec<Color> = (0..16)
//!     .map(|i| Color::new("oklch", [0.7, 0.4, i as f64 * 22.5], 1.0).unwrap())
//!     .collect();
//! let fitted = fit_all(&colors, "srgb", FitMethod::RayTrace, &FitOptions::default());
//! assert!(fitted.iter().all(|c| c.as_ref().unwrap().in_gamut_of("srgb", 1e-9).unwrap()));
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::color::Color;
use crate::error::ColorResult;
use crate::fit::{FitMethod, FitOptions};

/// Fits every color into `space`; one result per input, in order.
pub fn fit_all(colors: &[Color], space: &str, method: FitMethod, options: &FitOptions) -> Vec<ColorResult<Color>> {
    debug!(count = colors.len(), space, method = method.name(), "fit batch");

    #[cfg(feature = "parallel")]
    {
        colors.par_iter().map(|c| c.fit(space, method, options)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        colors.iter().map(|c| c.fit(space, method, options)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors: Vec<Color> = (0..64)
            .map(|_| {
                let l = rng.gen_range(0.05..0.95);
                let c = rng.gen_range(0.0..0.4);
                let h = rng.gen_range(0.0..360.0);
                Color::new("oklch", [l, c, h], 1.0).unwrap()
            })
            .collect();
        let opts = FitOptions::default();
        for method in FitMethod::ALL {
            let batch = fit_all(&colors, "srgb", method, &opts);
            for (c, b) in colors.iter().zip(&batch) {
                let one = c.fit("srgb", method, &opts).unwrap();
                let b = b.as_ref().unwrap();
                assert_eq!(one.coords().map(f64::to_bits), b.coords().map(f64::to_bits));
            }
        }
    }

    #[test]
    fn test_errors_are_per_color() {
        let colors = vec![Color::new("srgb", [1.5, 0.0, 0.0], 1.0).unwrap()];
        let out = fit_all(&colors, "cmyk", FitMethod::Clip, &FitOptions::default());
        assert!(out[0].is_err());
    }
}
