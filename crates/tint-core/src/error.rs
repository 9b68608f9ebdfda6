//! Error types for space lookup and conversion routing.
//!
//! # Usage
//!
//! ```rust
//! use tint_core::{SpaceError, SpaceResult};
//!
//! fn lookup(name: &str) -> SpaceResult<()> {
//!     Err(SpaceError::UnknownSpace { name: name.into() })
//! }
//!
//! assert!(lookup("cmyk").unwrap_err().to_string().contains("cmyk"));
//! ```
//!
//! # Used By
//!
//! - `tint-spaces` - registry lookups and conversion chains
//! - `tint-color` - wrapped into `ColorError`

use thiserror::Error;

/// Result alias for space operations.
pub type SpaceResult<T> = std::result::Result<T, SpaceError>;

/// Errors raised while resolving or routing between color spaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpaceError {
    /// No space is registered under this name.
    #[error("unknown color space '{name}'")]
    UnknownSpace {
        /// Requested name.
        name: String,
    },

    /// The two spaces share no common ancestor.
    #[error("no conversion path from '{from}' to '{to}'")]
    NoConversionPath {
        /// Source space.
        from: String,
        /// Destination space.
        to: String,
    },

    /// A space names a base that is not registered.
    #[error("space '{space}' has unregistered base '{base}'")]
    MissingBase {
        /// Space being registered.
        space: String,
        /// Missing base name.
        base: String,
    },

    /// The operation needs an RGB-like space.
    #[error("'{space}' is not an RGB-like space")]
    NotRgb {
        /// Offending space.
        space: String,
    },
}
