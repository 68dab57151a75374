//! Error types for matrix and vector operations.
//!
//! Every operation in this crate is a pure, single-shot computation, so
//! errors are returned to the caller immediately and never retried.
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{MathError, MathResult, Mat4};
//!
//! fn checked_inverse(m: &Mat4) -> MathResult<Mat4> {
//!     m.inverse()
//! }
//!
//! let err = checked_inverse(&Mat4::ZERO).unwrap_err();
//! assert!(err.is_singular());
//! ```

use thiserror::Error;

/// Result type alias using [`MathError`] as the error type.
pub type MathResult<T> = std::result::Result<T, MathError>;

/// Errors that can occur during matrix and vector operations.
///
/// # Categories
///
/// - **Argument errors**: [`InvalidArgument`](MathError::InvalidArgument)
/// - **Numeric errors**: [`SingularMatrix`](MathError::SingularMatrix)
/// - **Batch errors**: [`Batch`](MathError::Batch) wraps the first failing element
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    /// An argument has an unsupported shape or value.
    ///
    /// Returned for vectors that are neither 3 nor 4 components long,
    /// for multiply calls whose output slot is one of the inputs, and
    /// for batches whose lengths cannot be broadcast together.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The matrix has no inverse.
    ///
    /// `column` is the elimination column where no usable pivot was found.
    #[error("singular matrix: no pivot in column {column}")]
    SingularMatrix {
        /// Column without a usable pivot
        column: usize,
    },

    /// An element of a batched operation failed.
    #[error("batch element {index}: {source}")]
    Batch {
        /// Index of the failing element
        index: usize,
        /// Error raised for that element
        source: Box<MathError>,
    },
}

impl MathError {
    /// Creates an [`MathError::InvalidArgument`] error.
    #[inline]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates an [`MathError::SingularMatrix`] error.
    #[inline]
    pub fn singular(column: usize) -> Self {
        Self::SingularMatrix { column }
    }

    /// Wraps `self` as the failure of batch element `index`.
    #[inline]
    pub fn at_index(self, index: usize) -> Self {
        Self::Batch {
            index,
            source: Box::new(self),
        }
    }

    /// Returns `true` if this error (or the batch element it wraps) is a
    /// singular-matrix failure.
    pub fn is_singular(&self) -> bool {
        match self {
            Self::SingularMatrix { .. } => true,
            Self::Batch { source, .. } => source.is_singular(),
            Self::InvalidArgument(_) => false,
        }
    }

    /// Returns `true` if this error (or the batch element it wraps) is an
    /// invalid-argument failure.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Self::InvalidArgument(_) => true,
            Self::Batch { source, .. } => source.is_invalid_argument(),
            Self::SingularMatrix { .. } => false,
        }
    }
}
