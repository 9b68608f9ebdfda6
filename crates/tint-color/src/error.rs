//! Error types for color operations.
//!
//! [`ColorError`] wraps the lower-level [`SpaceError`] and [`AlgebraError`]
//! so that callers of the facade deal with a single error type.

use thiserror::Error;
use tint_core::SpaceError;
use tint_math::AlgebraError;

/// Color operation error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Space lookup or routing failed.
    #[error(transparent)]
    Space(#[from] SpaceError),

    /// Matrix or array operation failed.
    #[error("matrix error: {0}")]
    Algebra(#[from] AlgebraError),

    /// No gamut mapping method with this name.
    #[error("'{name}' gamut mapping is not supported")]
    UnknownMethod {
        /// Requested method.
        name: String,
    },

    /// No Delta E method with this name.
    #[error("unknown delta E method '{name}'")]
    UnknownDeltaE {
        /// Requested method.
        name: String,
    },

    /// Channel index past the last coordinate.
    #[error("channel index {index} out of range, a color has 3 channels")]
    Index {
        /// Requested index.
        index: usize,
    },

    /// A fit option is out of range or names an unusable space.
    #[error("invalid option '{name}': {reason}")]
    InvalidOption {
        /// Option name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
