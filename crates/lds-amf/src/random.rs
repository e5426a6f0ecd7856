use lds_linalg::Matrix;
use rand::Rng;

use crate::{check_inputs, uniform_matrix, AmfError, InitializationRule};

/// Fills `W` and `H` with independent `U[0, 1)` samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomInitialization;

impl InitializationRule for RandomInitialization {
    fn initialize<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        v_mat: &Matrix,
        rank: usize,
    ) -> Result<(Matrix, Matrix), AmfError> {
        check_inputs(v_mat, rank)?;
        let w_mat = uniform_matrix(rng, v_mat.nrows(), rank, 0.0);
        let h_mat = uniform_matrix(rng, rank, v_mat.ncols(), 0.0);
        Ok((w_mat, h_mat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_shapes_and_range() -> Result<(), AmfError> {
        let mut rng = StdRng::seed_from_u64(4);
        let v = Matrix::zeros(5, 3);
        let (w, h) = RandomInitialization.initialize(&mut rng, &v, 2)?;
        assert_eq!((w.nrows(), w.ncols()), (5, 2));
        assert_eq!((h.nrows(), h.ncols()), (2, 3));
        for j in 0..2 {
            for i in 0..5 {
                assert!((0.0..1.0).contains(&w.read(i, j)));
            }
        }
        Ok(())
    }

    #[test]
    fn test_random_rejects_zero_rank() {
        let mut rng = StdRng::seed_from_u64(4);
        let res = RandomInitialization.initialize(&mut rng, &Matrix::zeros(2, 2), 0);
        assert_eq!(res.err(), Some(AmfError::InvalidRank(0)));
    }
}
