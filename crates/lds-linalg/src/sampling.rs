use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::{LinalgError, Matrix, NumericTol, Vector};

/// Fill `v` in place with independent standard-normal samples.
///
/// # Example
///
/// ```
/// use lds_linalg::{sampling::rand_vector, Vector};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let mut v = Vector::zeros(4);
/// rand_vector(&mut rng, &mut v);
/// assert!((0..4).all(|i| v.read(i).is_finite()));
/// ```
pub fn rand_vector<R: Rng + ?Sized>(rng: &mut R, v: &mut Vector) {
    for i in 0..v.nrows() {
        v.write(i, StandardNormal.sample(rng));
    }
}

/// Draw a standard-normal vector of length `n`.
pub fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vector {
    let mut v = Vector::zeros(n);
    rand_vector(rng, &mut v);
    v
}

/// Factor a covariance matrix `Q` into `L` such that `L·Lᵀ = Q`.
///
/// A Cholesky factorization is tried first. Covariances that are only
/// semidefinite fall back to the symmetric eigendecomposition `Q = U·Λ·Uᵀ`,
/// giving `L = U·Λ^½` with eigenvalues in `[-tol.psd·max(1, λ_max), 0)` clamped to zero.
///
/// # Errors
///
/// * [`LinalgError::DimensionMismatch`] if `Q` is not square.
/// * [`LinalgError::NotPositiveSemidefinite`] if `Q` has a non-finite entry,
///   is not symmetric within `tol.symmetry`, or has an eigenvalue below the
///   tolerated slack. `min_eigenvalue` is NaN for the first two cases.
pub fn covariance_factor(q_mat: &Matrix, tol: &NumericTol) -> Result<Matrix, LinalgError> {
    let n = q_mat.nrows();
    if q_mat.ncols() != n {
        return Err(LinalgError::shape_mismatch(
            "covariance_factor",
            (n, n),
            (q_mat.nrows(), q_mat.ncols()),
        ));
    }

    let entries = move || (0..n).flat_map(move |i| (0..n).map(move |j| q_mat.read(i, j)));
    if !entries().all(f64::is_finite) {
        return Err(LinalgError::NotPositiveSemidefinite {
            min_eigenvalue: f64::NAN,
        });
    }

    let scale = entries().map(f64::abs).fold(1.0_f64, f64::max);
    for i in 0..n {
        for j in 0..i {
            if (q_mat.read(i, j) - q_mat.read(j, i)).abs() > tol.symmetry * scale {
                return Err(LinalgError::NotPositiveSemidefinite {
                    min_eigenvalue: f64::NAN,
                });
            }
        }
    }

    if let Ok(cholesky) = q_mat.cholesky(faer::Side::Lower) {
        return Ok(cholesky.compute_l());
    }

    log::debug!("covariance_factor: Cholesky failed, falling back to eigendecomposition");

    let evd = q_mat.selfadjoint_eigendecomposition(faer::Side::Lower);
    let u_mat = evd.u();
    let eigenvalues = evd.s().column_vector();

    let mut min_eigenvalue = f64::INFINITY;
    let mut max_eigenvalue = f64::NEG_INFINITY;
    for k in 0..n {
        let lambda = eigenvalues.read(k);
        min_eigenvalue = min_eigenvalue.min(lambda);
        max_eigenvalue = max_eigenvalue.max(lambda);
    }
    if min_eigenvalue.is_nan() || min_eigenvalue < -tol.psd * max_eigenvalue.abs().max(1.0) {
        return Err(LinalgError::NotPositiveSemidefinite { min_eigenvalue });
    }

    Ok(Matrix::from_fn(n, n, |i, j| {
        u_mat.read(i, j) * eigenvalues.read(j).max(0.0).sqrt()
    }))
}

/// Fill `v` with a sample of the zero-mean Gaussian with covariance `Q`,
/// using the default tolerances.
///
/// See [`rand_vector_with_cov_tol`].
pub fn rand_vector_with_cov<R: Rng + ?Sized>(
    rng: &mut R,
    q_mat: &Matrix,
    v: &mut Vector,
) -> Result<(), LinalgError> {
    rand_vector_with_cov_tol(rng, q_mat, v, &NumericTol::default())
}

/// Fill `v` with a sample of the zero-mean Gaussian with covariance `Q`.
///
/// Computes `v = L·z` where `L·Lᵀ = Q` and `z` is standard normal.
///
/// # Errors
///
/// * [`LinalgError::DimensionMismatch`] if `Q` is not square or `v` does not
///   match its dimension.
/// * [`LinalgError::NotPositiveSemidefinite`] if `Q` cannot be factored.
pub fn rand_vector_with_cov_tol<R: Rng + ?Sized>(
    rng: &mut R,
    q_mat: &Matrix,
    v: &mut Vector,
    tol: &NumericTol,
) -> Result<(), LinalgError> {
    if v.nrows() != q_mat.nrows() {
        return Err(LinalgError::shape_mismatch(
            "rand_vector_with_cov",
            (q_mat.nrows(), 1),
            (v.nrows(), 1),
        ));
    }
    GaussianSampler::with_tol(q_mat, tol)?.sample_into(rng, v)
}

/// Draw a sample of the zero-mean Gaussian with covariance `Q`.
pub fn sample_gaussian<R: Rng + ?Sized>(
    rng: &mut R,
    q_mat: &Matrix,
) -> Result<Vector, LinalgError> {
    Ok(GaussianSampler::new(q_mat)?.sample(rng))
}

/// A zero-mean multivariate Gaussian with a pre-computed covariance factor.
///
/// Holds the factor `L` of `Q`; every draw reuses the same factorization.
#[derive(Debug, Clone)]
pub struct GaussianSampler {
    factor: Matrix,
}

impl GaussianSampler {
    /// Create a sampler for covariance `Q` with the default tolerances.
    pub fn new(q_mat: &Matrix) -> Result<Self, LinalgError> {
        Self::with_tol(q_mat, &NumericTol::default())
    }

    /// Create a sampler for covariance `Q`.
    pub fn with_tol(q_mat: &Matrix, tol: &NumericTol) -> Result<Self, LinalgError> {
        Ok(Self {
            factor: covariance_factor(q_mat, tol)?,
        })
    }

    /// Dimension of the sampled vectors.
    pub fn dim(&self) -> usize {
        self.factor.nrows()
    }

    /// The factor `L` with `L·Lᵀ = Q`.
    pub fn factor(&self) -> &Matrix {
        &self.factor
    }

    /// Draw one sample.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector {
        let z = sample_standard_normal(rng, self.dim());
        &self.factor * &z
    }

    /// Draw one sample into the pre-allocated `v`.
    pub fn sample_into<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        v: &mut Vector,
    ) -> Result<(), LinalgError> {
        if v.nrows() != self.dim() {
            return Err(LinalgError::shape_mismatch(
                "GaussianSampler::sample_into",
                (self.dim(), 1),
                (v.nrows(), 1),
            ));
        }
        let sample = self.sample(rng);
        for i in 0..sample.nrows() {
            v.write(i, sample.read(i));
        }
        Ok(())
    }
}
