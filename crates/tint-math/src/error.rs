//! Error types for array algebra.
//!
//! Every fallible array operation returns [`AlgebraResult`].
//! Geometry helpers never fail: a missed intersection is reported as `None`.
//!
//! # Usage
//!
//! ```rust
//! use tint_math::{inv, Array, AlgebraError};
//!
//! let m = Array::from([[1.0, 1.0], [1.0, 1.0]]);
//! assert!(matches!(inv(&m), Err(AlgebraError::Singular)));
//! ```

use thiserror::Error;

/// Result alias for algebra operations.
pub type AlgebraResult<T> = std::result::Result<T, AlgebraError>;

/// Errors raised by shape inference, broadcasting and linear algebra.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgebraError {
    /// Nested sequences at one depth have different lengths, or mix
    /// scalars with sequences.
    #[error("ragged array: sub-sequences must share one shape")]
    Ragged,

    /// Element count differs between the source and the requested shape.
    #[error("cannot reshape array of shape {from:?} into shape {to:?}")]
    Reshape {
        /// Source shape.
        from: Vec<usize>,
        /// Requested shape.
        to: Vec<usize>,
    },

    /// Shapes cannot be broadcast together.
    #[error("shapes {a:?} and {b:?} cannot be broadcast together")]
    Broadcast {
        /// Left operand shape (or source shape for `broadcast_to`).
        a: Vec<usize>,
        /// Right operand shape (or target shape for `broadcast_to`).
        b: Vec<usize>,
    },

    /// Operand shapes are incompatible for a contraction.
    #[error("{op}: shapes {a:?} and {b:?} are not aligned")]
    ShapeMismatch {
        /// Operation name.
        op: &'static str,
        /// Left operand shape.
        a: Vec<usize>,
        /// Right operand shape.
        b: Vec<usize>,
    },

    /// Inversion requested for a non-square matrix.
    #[error("matrix of shape {shape:?} is not square")]
    NotSquare {
        /// Offending shape.
        shape: Vec<usize>,
    },

    /// No non-zero pivot could be found.
    #[error("matrix is singular")]
    Singular,

    /// Operand has the wrong number of dimensions.
    #[error("{op}: expected {expected} dimension(s), got {got}")]
    InvalidRank {
        /// Operation name.
        op: &'static str,
        /// Accepted rank description.
        expected: &'static str,
        /// Actual rank.
        got: usize,
    },
}
