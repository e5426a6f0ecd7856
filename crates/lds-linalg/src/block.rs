use crate::{LinalgError, Matrix, Vector};

/// Validate the closed interval `[start, end]` against a dimension of size `len`.
fn check_range(start: usize, end: usize, len: usize) -> Result<usize, LinalgError> {
    if start > end || end >= len {
        return Err(LinalgError::IndexOutOfRange { start, end, len });
    }
    Ok(end - start + 1)
}

/// Concatenate two matrices horizontally, `X = [A | B]`.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the row counts differ.
///
/// # Example
///
/// ```
/// use lds_linalg::{block::concat_cols, Matrix};
///
/// let a = Matrix::from_fn(2, 1, |i, _| i as f64);
/// let b = Matrix::from_fn(2, 2, |_, _| 9.0);
/// let x = concat_cols(&a, &b).unwrap();
/// assert_eq!((x.nrows(), x.ncols()), (2, 3));
/// assert_eq!(x.read(1, 0), 1.0);
/// assert_eq!(x.read(1, 2), 9.0);
/// ```
pub fn concat_cols(a_mat: &Matrix, b_mat: &Matrix) -> Result<Matrix, LinalgError> {
    if a_mat.nrows() != b_mat.nrows() {
        return Err(LinalgError::shape_mismatch(
            "concat_cols",
            (a_mat.nrows(), b_mat.ncols()),
            (b_mat.nrows(), b_mat.ncols()),
        ));
    }

    let split = a_mat.ncols();
    Ok(Matrix::from_fn(
        a_mat.nrows(),
        split + b_mat.ncols(),
        |i, j| {
            if j < split {
                a_mat.read(i, j)
            } else {
                b_mat.read(i, j - split)
            }
        },
    ))
}

/// Concatenate two matrices vertically, `A` stacked above `B`.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the column counts differ.
pub fn concat_rows(a_mat: &Matrix, b_mat: &Matrix) -> Result<Matrix, LinalgError> {
    if a_mat.ncols() != b_mat.ncols() {
        return Err(LinalgError::shape_mismatch(
            "concat_rows",
            (b_mat.nrows(), a_mat.ncols()),
            (b_mat.nrows(), b_mat.ncols()),
        ));
    }

    let split = a_mat.nrows();
    Ok(Matrix::from_fn(
        split + b_mat.nrows(),
        a_mat.ncols(),
        |i, j| {
            if i < split {
                a_mat.read(i, j)
            } else {
                b_mat.read(i - split, j)
            }
        },
    ))
}

/// Copy the block of rows `[r_in, r_out]` and columns `[c_in, c_out]` of `A`.
///
/// Both intervals are 0-indexed and inclusive.
///
/// # Errors
///
/// Returns [`LinalgError::IndexOutOfRange`] if an interval is inverted or
/// exceeds the shape of `A`.
///
/// # Example
///
/// ```
/// use lds_linalg::{block::extract_sub_matrix, Matrix};
///
/// // [[1, 2], [3, 4], [5, 6]]
/// let a = Matrix::from_fn(3, 2, |i, j| (2 * i + j + 1) as f64);
/// let x = extract_sub_matrix(&a, 1, 2, 0, 0).unwrap();
/// assert_eq!((x.nrows(), x.ncols()), (2, 1));
/// assert_eq!(x.read(0, 0), 3.0);
/// assert_eq!(x.read(1, 0), 5.0);
/// ```
pub fn extract_sub_matrix(
    a_mat: &Matrix,
    r_in: usize,
    r_out: usize,
    c_in: usize,
    c_out: usize,
) -> Result<Matrix, LinalgError> {
    let nrows = check_range(r_in, r_out, a_mat.nrows())?;
    let ncols = check_range(c_in, c_out, a_mat.ncols())?;
    Ok(a_mat.submatrix(r_in, c_in, nrows, ncols).to_owned())
}

/// Copy the entries `[r_in, r_out]` of `v` into a new vector.
///
/// # Errors
///
/// Returns [`LinalgError::IndexOutOfRange`] if the interval is inverted or
/// exceeds the length of `v`.
pub fn extract_sub_vector(v: &Vector, r_in: usize, r_out: usize) -> Result<Vector, LinalgError> {
    let len = check_range(r_in, r_out, v.nrows())?;
    Ok(Vector::from_fn(len, |i| v.read(r_in + i)))
}

/// Copy the entries `[r_in, r_out]` of `v` into the pre-allocated `x`.
///
/// # Errors
///
/// * [`LinalgError::IndexOutOfRange`] if the interval is invalid for `v`.
/// * [`LinalgError::DimensionMismatch`] if `x` does not hold exactly
///   `r_out - r_in + 1` entries.
pub fn extract_sub_vector_into(
    v: &Vector,
    r_in: usize,
    r_out: usize,
    x: &mut Vector,
) -> Result<(), LinalgError> {
    let len = check_range(r_in, r_out, v.nrows())?;
    if x.nrows() != len {
        return Err(LinalgError::shape_mismatch(
            "extract_sub_vector_into",
            (len, 1),
            (x.nrows(), 1),
        ));
    }
    for i in 0..len {
        x.write(i, v.read(r_in + i));
    }
    Ok(())
}

/// Write `A` into the block of rows `[r_in, r_out]` and columns `[c_in, c_out]` of `X`.
///
/// PRECONDITION: `x_mat` is allocated with its final shape.
///
/// # Errors
///
/// * [`LinalgError::IndexOutOfRange`] if the block exceeds the shape of `X`.
/// * [`LinalgError::DimensionMismatch`] if the block shape differs from `A`.
pub fn set_sub_matrix(
    a_mat: &Matrix,
    r_in: usize,
    r_out: usize,
    c_in: usize,
    c_out: usize,
    x_mat: &mut Matrix,
) -> Result<(), LinalgError> {
    let nrows = check_range(r_in, r_out, x_mat.nrows())?;
    let ncols = check_range(c_in, c_out, x_mat.ncols())?;
    if (nrows, ncols) != (a_mat.nrows(), a_mat.ncols()) {
        return Err(LinalgError::shape_mismatch(
            "set_sub_matrix",
            (nrows, ncols),
            (a_mat.nrows(), a_mat.ncols()),
        ));
    }
    for j in 0..ncols {
        for i in 0..nrows {
            x_mat.write(r_in + i, c_in + j, a_mat.read(i, j));
        }
    }
    Ok(())
}

/// Write the vector `a` into column `c`, rows `[r_in, r_out]` of `X`.
///
/// # Errors
///
/// * [`LinalgError::IndexOutOfRange`] if the rows or the column exceed the shape of `X`.
/// * [`LinalgError::DimensionMismatch`] if `a` does not hold `r_out - r_in + 1` entries.
pub fn set_sub_column(
    a: &Vector,
    r_in: usize,
    r_out: usize,
    c: usize,
    x_mat: &mut Matrix,
) -> Result<(), LinalgError> {
    let nrows = check_range(r_in, r_out, x_mat.nrows())?;
    check_range(c, c, x_mat.ncols())?;
    if nrows != a.nrows() {
        return Err(LinalgError::shape_mismatch(
            "set_sub_column",
            (nrows, 1),
            (a.nrows(), 1),
        ));
    }
    for i in 0..nrows {
        x_mat.write(r_in + i, c, a.read(i));
    }
    Ok(())
}
