//! # tint-core
//!
//! Shared vocabulary for the tint crates.
//!
//! - [`Space`] - the color space capability (channels, base conversions)
//! - [`Channel`] - per-coordinate range, bound and angle flags
//! - [`SpaceKind`], [`DynamicRange`] - classification used by gamut mapping
//! - [`D65_XY`], [`xy_to_xyz`] - reference whites
//! - [`SpaceError`] - lookup and routing failures
//!
//! # Dependencies
//!
//! - [`thiserror`] - error derive
//! - `serde` (optional) - serialization of the enums
//!
//! # Used By
//!
//! - `tint-spaces` - builtin space implementations and the registry
//! - `tint-color` - gamut verification and fitting

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod channel;
mod error;
mod space;
mod white;

pub use channel::*;
pub use error::*;
pub use space::*;
pub use white::*;
