use std::fmt;

use crate::Matrix;

/// A labelled view of a matrix that renders it row by row.
///
/// # Example
///
/// ```
/// use lds_linalg::{display::MatrixDisplay, Matrix};
///
/// let a = Matrix::from_fn(1, 2, |_, j| j as f64);
/// let text = MatrixDisplay::new(&a, "a_mat").to_string();
/// assert!(text.starts_with("a_mat (1x2)"));
/// ```
pub struct MatrixDisplay<'a> {
    mat: &'a Matrix,
    name: &'a str,
}

impl<'a> MatrixDisplay<'a> {
    /// Create a display wrapper for `mat` labelled `name`.
    pub fn new(mat: &'a Matrix, name: &'a str) -> Self {
        Self { mat, name }
    }
}

impl fmt::Display for MatrixDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}x{}):", self.name, self.mat.nrows(), self.mat.ncols())?;
        for i in 0..self.mat.nrows() {
            for j in 0..self.mat.ncols() {
                write!(f, " {:>12.6}", self.mat.read(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render `a_mat` and its label as text.
pub fn format_matrix(a_mat: &Matrix, name: &str) -> String {
    MatrixDisplay::new(a_mat, name).to_string()
}

/// Print `a_mat` and its label to stdout.
pub fn print_matrix(a_mat: &Matrix, name: &str) {
    print!("{}", MatrixDisplay::new(a_mat, name));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matrix() {
        let a = Matrix::from_fn(2, 2, |i, j| (2 * i + j) as f64 - 1.5);
        let expected = "q_mat (2x2):\n    -1.500000    -0.500000\n     0.500000     1.500000\n";
        assert_eq!(format_matrix(&a, "q_mat"), expected);
    }

    #[test]
    fn test_format_empty_matrix() {
        let a = Matrix::zeros(0, 3);
        assert_eq!(format_matrix(&a, "empty"), "empty (0x3):\n");
    }

    #[test]
    fn test_print_matrix_does_not_fail() {
        print_matrix(&Matrix::zeros(1, 1), "x");
    }
}
