use thiserror::Error;

/// An error type for the LDS matrix operations.
#[derive(Error, Debug, PartialEq)]
pub enum LinalgError {
    /// The operands are not conformable for the requested operation.
    #[error("Dimension mismatch in {op}: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Name of the operation that rejected its operands.
        op: &'static str,
        /// The (rows, cols) shape the operation required.
        expected: (usize, usize),
        /// The (rows, cols) shape the operation received.
        actual: (usize, usize),
    },

    /// An index range is inverted or exceeds the dimension it indexes.
    #[error("Index range [{start}, {end}] is invalid for a dimension of size {len}")]
    IndexOutOfRange {
        /// First index of the closed interval.
        start: usize,
        /// Last index of the closed interval.
        end: usize,
        /// Size of the indexed dimension.
        len: usize,
    },

    /// The matrix to invert is singular or numerically ill-conditioned.
    #[error("Matrix is singular or ill-conditioned (reciprocal condition number {rcond:e})")]
    SingularMatrix {
        /// Ratio of the smallest to the largest singular value.
        rcond: f64,
    },

    /// The covariance matrix cannot be factored as `L·Lᵀ`.
    #[error("Matrix is not positive semidefinite (smallest eigenvalue {min_eigenvalue:e})")]
    NotPositiveSemidefinite {
        /// Smallest eigenvalue found, or NaN if the matrix is not symmetric.
        min_eigenvalue: f64,
    },
}

impl LinalgError {
    pub(crate) fn shape_mismatch(
        op: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        LinalgError::DimensionMismatch {
            op,
            expected,
            actual,
        }
    }
}
