use lds_linalg::Matrix;
use rand::Rng;

use crate::{check_inputs, uniform_matrix, AmfError, InitializationRule};

/// Initializes `W` and `H` around the root of the average of `V`.
///
/// With `sum` and `min` taken over the nonzero entries of the `n×m` matrix `V`,
/// every entry of `W` and `H` is
///
/// ```text
/// sqrt((sum / (n·m) - min) / rank) + U[0, 1)
/// ```
///
/// Subtracting the lower bound `min` before dividing by the rank keeps the
/// product `W·H` close to the scale of `V`. A negative radicand is clamped to
/// zero, leaving pure uniform noise.
///
/// # Example
///
/// ```
/// use lds_amf::{AverageInitialization, InitializationRule};
/// use lds_linalg::Matrix;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let v = Matrix::from_fn(2, 2, |i, j| (2 * i + j + 1) as f64);
/// let (w, h) = AverageInitialization.initialize(&mut rng, &v, 1).unwrap();
/// assert_eq!((w.nrows(), w.ncols()), (2, 1));
/// assert_eq!((h.nrows(), h.ncols()), (1, 2));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageInitialization;

impl AverageInitialization {
    /// The constant added to the uniform noise for `V` and `rank`.
    ///
    /// # Errors
    ///
    /// * [`AmfError::EmptyMatrix`] if `V` has a zero dimension.
    /// * [`AmfError::InvalidRank`] if `rank` is zero.
    /// * [`AmfError::NoNonzeroEntries`] if every entry of `V` is zero.
    pub fn offset(v_mat: &Matrix, rank: usize) -> Result<f64, AmfError> {
        check_inputs(v_mat, rank)?;

        let (n, m) = (v_mat.nrows(), v_mat.ncols());
        let mut sum = 0.0;
        let mut count = 0usize;
        let mut min = f64::MAX;
        for j in 0..m {
            for i in 0..n {
                let value = v_mat.read(i, j);
                if value != 0.0 {
                    count += 1;
                    sum += value;
                    min = min.min(value);
                }
            }
        }
        if count == 0 {
            return Err(AmfError::NoNonzeroEntries);
        }

        let radicand = (sum / (n * m) as f64 - min) / rank as f64;
        if radicand < 0.0 {
            log::warn!(
                "average initialization: clamping negative radicand {:e} to zero",
                radicand
            );
            return Ok(0.0);
        }
        Ok(radicand.sqrt())
    }
}

impl InitializationRule for AverageInitialization {
    fn initialize<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        v_mat: &Matrix,
        rank: usize,
    ) -> Result<(Matrix, Matrix), AmfError> {
        let offset = Self::offset(v_mat, rank)?;
        log::debug!(
            "average initialization: {}x{} with rank {}, offset {}",
            v_mat.nrows(),
            v_mat.ncols(),
            rank,
            offset
        );

        let w_mat = uniform_matrix(rng, v_mat.nrows(), rank, offset);
        let h_mat = uniform_matrix(rng, rank, v_mat.ncols(), offset);
        Ok((w_mat, h_mat))
    }
}
