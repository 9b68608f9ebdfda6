//! # tint-spaces
//!
//! Builtin color spaces and conversion routing.
//!
//! | Space                 | Base               | Kind |
//! |-----------------------|--------------------|------|
//! | `xyz-d65`             | (root)             | XYZ  |
//! | `srgb-linear`         | `xyz-d65`          | RGB  |
//! | `srgb`                | `srgb-linear`      | RGB  |
//! | `display-p3-linear`   | `xyz-d65`          | RGB  |
//! | `display-p3`          | `display-p3-linear`| RGB  |
//! | `rec2020-linear`      | `xyz-d65`          | RGB  |
//! | `rec2020`             | `rec2020-linear`   | RGB  |
//! | `rec2100-linear`      | `xyz-d65`          | RGB  |
//! | `rec2100-pq`          | `rec2100-linear`   | RGB (HDR) |
//! | `oklab` / `oklch`     | `xyz-d65` / `oklab`| Lab / LCh |
//! | `lab-d65` / `lch-d65` | `xyz-d65` / `lab-d65` | Lab / LCh |
//! | `hsl`, `hsv`          | `srgb`             | HSL / HSV |
//! | `hwb`                 | `hsv`              | HWB  |
//!
//! # Usage
//!
//! ```rust
//! use tint_spaces::SpaceRegistry;
//!
//! let reg = SpaceRegistry::builtin();
//! let lab = reg.convert("srgb", "oklab", [1.0, 1.0, 1.0]).unwrap();
//! assert!((lab[0] - 1.0).abs() < 1e-6);
//! ```
//!
//! # Dependencies
//!
//! - `tint-core` - the [`Space`](tint_core::Space) trait
//! - `tint-math` - matrix derivation and polar helpers
//! - [`tracing`] - registration logging
//!
//! # Used By
//!
//! - `tint-color` - the `Color` facade and gamut mapping

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cylinder;
pub mod lab;
pub mod oklab;
pub mod polar;
pub mod primaries;
mod registry;
pub mod rgb;
pub mod transfer;
mod xyz;

pub use cylinder::{Hsl, Hsv, Hwb};
pub use lab::{LabD65, LchD65};
pub use oklab::{Oklab, Oklch};
pub use primaries::{Primaries, RgbMatrices};
pub use registry::*;
pub use rgb::{EncodedRgb, LinearRgb};
pub use transfer::Transfer;
pub use xyz::XyzD65;
