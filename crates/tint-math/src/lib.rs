//! # tint-math
//!
//! Numeric foundation for color transforms and gamut mapping.
//!
//! - [`Array`] - nested scalar/sequence values with NumPy-like shape rules
//! - [`broadcast`], [`broadcast_to`] - trailing-dimension broadcasting
//! - [`dot`], [`matmul`], [`inv`] - products and Gauss-Jordan inversion
//! - [`geometry`] - ray/box and ray/cube-face intersection, projection
//! - [`scalar`] - fixed-size 3x3 helpers and hue/polar utilities
//!
//! # Design
//!
//! The general algebra is used where shapes vary (building matrices from
//! primaries, batched inversion). Conversions in hot paths use the
//! fixed-size [`Matrix3`] and [`Vector3`] aliases instead.
//!
//! NaN marks an undefined channel (for example the hue of a gray). It is
//! never an error and flows through all arithmetic.
//!
//! # Usage
//!
//! ```rust
//! use tint_math::{dot, identity, inv, Array};
//!
//! let m = Array::from([[2.0, 0.0], [0.0, 4.0]]);
//! let mi = inv(&m).unwrap();
//! assert_eq!(dot(&mi, &m).unwrap(), identity(2));
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - `DVec3` for the ray geometry
//! - [`thiserror`] - error derive
//!
//! # Used By
//!
//! - `tint-spaces` - RGB/XYZ matrix generation, polar conversions
//! - `tint-color` - gamut verification and fitting

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod array;
mod broadcast;
mod error;
mod linalg;
mod ops;

pub mod geometry;
pub mod scalar;

pub use array::*;
pub use broadcast::{broadcast, broadcast_shapes, broadcast_to, Broadcast};
pub use error::*;
pub use geometry::{project_onto, raytrace_box, raytrace_cube, raytrace_unit_box, CubeFace, CubeHit};
pub use linalg::*;
pub use ops::*;
pub use scalar::{Matrix3, Vector3};
