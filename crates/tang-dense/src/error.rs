//! Error types for tang-dense.

use thiserror::Error;

/// Errors raised by vector and matrix operations.
///
/// Every operation fails at the call site; nothing is retried or defaulted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DenseError {
    /// Operand shapes are incompatible for `op`.
    #[error("{op}: dimension mismatch (expected {expected}, got {got})")]
    DimensionMismatch {
        op: &'static str,
        expected: String,
        got: String,
    },

    /// Index outside `0..len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    /// Inverse requested on a matrix with zero determinant.
    #[error("matrix is singular")]
    SingularMatrix,

    /// Input has no usable magnitude (zero vector, empty operand, ...).
    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),

    /// Symmetric-only routine given a non-symmetric matrix.
    #[error("matrix is not symmetric")]
    NotSymmetric,
}

/// Result type for tang-dense operations.
pub type Result<T> = core::result::Result<T, DenseError>;

impl DenseError {
    pub(crate) fn dims(op: &'static str, expected: impl ToString, got: impl ToString) -> Self {
        Self::DimensionMismatch {
            op,
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    pub(crate) fn shape(op: &'static str, expected: (usize, usize), got: (usize, usize)) -> Self {
        Self::dims(
            op,
            format!("{}x{}", expected.0, expected.1),
            format!("{}x{}", got.0, got.1),
        )
    }

    pub(crate) fn not_square(op: &'static str, (r, c): (usize, usize)) -> Self {
        Self::dims(op, "square matrix", format!("{r}x{c}"))
    }

    pub(crate) fn index(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index: index as isize, len }
    }
}
