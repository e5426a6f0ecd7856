use faer::prelude::SpSolver;

use crate::{LinalgError, Matrix, NumericTol, Vector};

/// Propagate a state one step through the dynamics without input.
///
/// Computes `v = A·x + w`.
///
/// # Arguments
///
/// * `a_mat` - The state transition matrix `A` (n×k).
/// * `x` - The current state (length k).
/// * `w` - The additive term, usually a process noise realization (length n).
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the shapes are not conformable.
///
/// # Example
///
/// ```
/// use lds_linalg::{ops::propagate_one_step, Matrix, Vector};
///
/// let a = Matrix::from_fn(2, 2, |i, j| (i * 2 + j) as f64);
/// let x = Vector::from_fn(2, |_| 1.0);
/// let w = Vector::from_fn(2, |_| 0.5);
/// let v = propagate_one_step(&a, &x, &w).unwrap();
/// assert_eq!(v.read(0), 1.5);
/// assert_eq!(v.read(1), 5.5);
/// ```
pub fn propagate_one_step(
    a_mat: &Matrix,
    x: &Vector,
    w: &Vector,
) -> Result<Vector, LinalgError> {
    check_product("propagate_one_step", a_mat, x, w)?;
    Ok(a_mat * x + w)
}

/// Propagate a state one step through the dynamics with a control input.
///
/// Computes `v = A·x + B·u + w`.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if `A·x`, `B·u` and `w` do not
/// all have the same length, or if `x` / `u` do not match the column counts
/// of `A` / `B`.
pub fn propagate_one_step_with_input(
    a_mat: &Matrix,
    b_mat: &Matrix,
    x: &Vector,
    u: &Vector,
    w: &Vector,
) -> Result<Vector, LinalgError> {
    check_product("propagate_one_step_with_input", a_mat, x, w)?;
    check_product("propagate_one_step_with_input", b_mat, u, w)?;
    Ok(a_mat * x + b_mat * u + w)
}

fn check_product(
    op: &'static str,
    mat: &Matrix,
    rhs: &Vector,
    out: &Vector,
) -> Result<(), LinalgError> {
    if mat.ncols() != rhs.nrows() {
        return Err(LinalgError::shape_mismatch(
            op,
            (mat.ncols(), 1),
            (rhs.nrows(), 1),
        ));
    }
    if mat.nrows() != out.nrows() {
        return Err(LinalgError::shape_mismatch(
            op,
            (mat.nrows(), 1),
            (out.nrows(), 1),
        ));
    }
    Ok(())
}

/// Compute the Schur complement `A − B·C⁻¹·D` with the default tolerances.
///
/// See [`schur_with_tol`].
pub fn schur(
    a_mat: &Matrix,
    b_mat: &Matrix,
    c_mat: &Matrix,
    d_mat: &Matrix,
) -> Result<Matrix, LinalgError> {
    schur_with_tol(a_mat, b_mat, c_mat, d_mat, &NumericTol::default())
}

/// Compute the Schur complement `A − B·C⁻¹·D`.
///
/// `C⁻¹·D` is obtained from an LU solve; `C` is never inverted explicitly.
///
/// # Arguments
///
/// * `a_mat` - The `p×q` block `A`.
/// * `b_mat` - The `p×k` block `B`.
/// * `c_mat` - The square `k×k` block `C`.
/// * `d_mat` - The `k×q` block `D`.
/// * `tol` - Tolerances; `tol.rcond` bounds the accepted conditioning of `C`.
///
/// # Errors
///
/// * [`LinalgError::DimensionMismatch`] if the blocks are not conformable.
/// * [`LinalgError::SingularMatrix`] if `C` is singular, its reciprocal
///   condition number is at most `tol.rcond`, or the result is not finite.
///   A non-finite result is reported with `rcond: 0.0`.
///
/// # Example
///
/// ```
/// use lds_linalg::{ops::schur, Matrix};
///
/// let a = Matrix::from_fn(1, 1, |_, _| 4.0);
/// let b = Matrix::from_fn(1, 1, |_, _| 2.0);
/// let c = Matrix::from_fn(1, 1, |_, _| 1.0);
/// let d = Matrix::from_fn(1, 1, |_, _| 2.0);
/// let m = schur(&a, &b, &c, &d).unwrap();
/// assert_eq!(m.read(0, 0), 0.0);
/// ```
pub fn schur_with_tol(
    a_mat: &Matrix,
    b_mat: &Matrix,
    c_mat: &Matrix,
    d_mat: &Matrix,
    tol: &NumericTol,
) -> Result<Matrix, LinalgError> {
    let k = c_mat.nrows();
    if c_mat.ncols() != k {
        return Err(LinalgError::shape_mismatch(
            "schur",
            (k, k),
            (c_mat.nrows(), c_mat.ncols()),
        ));
    }
    let (p, q) = (a_mat.nrows(), a_mat.ncols());
    if b_mat.nrows() != p || b_mat.ncols() != k {
        return Err(LinalgError::shape_mismatch(
            "schur",
            (p, k),
            (b_mat.nrows(), b_mat.ncols()),
        ));
    }
    if d_mat.nrows() != k || d_mat.ncols() != q {
        return Err(LinalgError::shape_mismatch(
            "schur",
            (k, q),
            (d_mat.nrows(), d_mat.ncols()),
        ));
    }

    if k == 0 {
        return Ok(a_mat.clone());
    }

    let rcond = reciprocal_condition(c_mat);
    if rcond.is_nan() || rcond <= tol.rcond {
        log::debug!("schur: rejecting C with rcond {:e} <= {:e}", rcond, tol.rcond);
        return Err(LinalgError::SingularMatrix { rcond });
    }

    // C⁻¹·D: k×q
    let c_inv_d = c_mat.partial_piv_lu().solve(d_mat.clone());
    let m_mat = a_mat - b_mat * &c_inv_d;

    let finite =
        (0..m_mat.nrows()).all(|i| (0..m_mat.ncols()).all(|j| m_mat.read(i, j).is_finite()));
    if !finite {
        // C is well conditioned but too small in magnitude, e.g. denormal
        log::debug!("schur: rejecting non-finite result, C has rcond {:e}", rcond);
        return Err(LinalgError::SingularMatrix { rcond: 0.0 });
    }

    Ok(m_mat)
}

/// Ratio of the smallest to the largest singular value, 0 for a zero matrix.
fn reciprocal_condition(mat: &Matrix) -> f64 {
    let singular_values = mat.singular_values();
    let max = singular_values.iter().cloned().fold(0.0_f64, f64::max);
    let min = singular_values
        .iter()
        .cloned()
        .fold(f64::INFINITY, f64::min);
    if max > 0.0 && max.is_finite() {
        min / max
    } else {
        0.0
    }
}
