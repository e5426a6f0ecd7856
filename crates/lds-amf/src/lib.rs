#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Alternating matrix factorization approximates a non-negative `n×m` matrix
//! `V` by `W·H` with `W: n×r` and `H: r×m`. The rules in this crate produce
//! the starting `(W, H)` pair.

/// Average-based initialization.
pub mod average;

/// Error types for the initialization rules.
pub mod error;

/// Uniform random initialization.
pub mod random;

pub use average::AverageInitialization;
pub use error::AmfError;
pub use random::RandomInitialization;

use lds_linalg::Matrix;
use rand::Rng;

/// A rule producing the initial factors `(W, H)` of `V ≈ W·H`.
pub trait InitializationRule {
    /// Initialize `W: n×rank` and `H: rank×m` for the `n×m` matrix `V`.
    fn initialize<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        v_mat: &Matrix,
        rank: usize,
    ) -> Result<(Matrix, Matrix), AmfError>;
}

/// Check the shape of `V` and the rank shared by every rule.
pub(crate) fn check_inputs(v_mat: &Matrix, rank: usize) -> Result<(), AmfError> {
    if v_mat.nrows() == 0 || v_mat.ncols() == 0 {
        return Err(AmfError::EmptyMatrix {
            rows: v_mat.nrows(),
            cols: v_mat.ncols(),
        });
    }
    if rank == 0 {
        return Err(AmfError::InvalidRank(rank));
    }
    Ok(())
}

/// A `rows×cols` matrix of `offset + U[0, 1)` entries.
pub(crate) fn uniform_matrix<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    offset: f64,
) -> Matrix {
    let mut mat = Matrix::zeros(rows, cols);
    for j in 0..cols {
        for i in 0..rows {
            mat.write(i, j, offset + rng.random::<f64>());
        }
    }
    mat
}
