//! # tint-color
//!
//! Color facade, Delta E and gamut mapping.
//!
//! # Architecture
//!
//! ```text
//!                  tint-color
//!                      |
//!        +-------------+-------------+
//!        |             |             |
//!      Color        DeltaE        gamut/*
//!        |                           |
//!   tint-spaces (registry)     tint-math (geometry)
//!        |
//!    tint-core
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use tint_color::{Color, FitMethod, FitOptions};
//!
//! let vivid = Color::new("oklch", [0.7, 0.35, 150.0], 1.0).unwrap();
//! assert!(!vivid.in_gamut_of("srgb", 0.0).unwrap());
//!
//! let srgb = vivid.convert("srgb").unwrap();
//! let fitted = srgb.fit("srgb", FitMethod::RayTrace, &FitOptions::default()).unwrap();
//! assert!(fitted.in_gamut(0.0).unwrap());
//! ```
//!
//! # Gamut Mapping Methods
//!
//! | Method           | Keeps                  | Cost            |
//! |------------------|------------------------|-----------------|
//! | `clip`           | nothing in particular  | one conversion  |
//! | `chroma-bisect`  | LCh lightness and hue  | ~10 steps       |
//! | `oklch-chroma`   | Oklch lightness and hue| ~12 steps       |
//! | `raytrace`       | lightness and hue      | 4 rounds        |
//! | `oklch-raytrace` | Oklch lightness and hue| 3 passes        |
//! | `lch-raytrace`   | LCh lightness and hue  | 3 passes        |
//! | `scale`          | channel ratios, luminance cap | one pass |
//!
//! # Features
//!
//! - `parallel` (default) - [`fit_all`] on the rayon thread pool
//! - `serde` - (de)serialization of [`FitOptions`], [`FitMethod`], [`DeltaE`]
//!
//! # Dependencies
//!
//! - `tint-core`, `tint-math`, `tint-spaces`
//! - [`thiserror`] - error derive
//! - [`tracing`] - fitter diagnostics
//! - `rayon` (optional) - batch fitting

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod color;
mod delta_e;
mod error;
mod fit;
pub mod gamut;
mod parallel;

pub use color::Color;
pub use delta_e::{ciede2000, DeltaE};
pub use error::{ColorError, ColorResult};
pub use fit::{Clip, FitMethod, FitOptions, GamutFit};
pub use gamut::DEFAULT_FIT_TOLERANCE;
pub use parallel::fit_all;

// Re-export sub-crates for convenience
pub use tint_math as math;
pub use tint_spaces as spaces;
pub use tint_spaces::{SpaceRef, SpaceRegistry};

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::{fit_all, Color, ColorError, ColorResult, DeltaE, FitMethod, FitOptions};
    pub use tint_core::{Channel, Space, SpaceKind};
    pub use tint_spaces::SpaceRegistry;
}
