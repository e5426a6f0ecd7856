use serde::{Deserialize, Serialize};

/// Numeric tolerances used by the inversion and factorization routines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericTol {
    /// Smallest accepted ratio of the smallest to the largest singular value
    /// of a matrix that is about to be inverted.
    pub rcond: f64,
    /// Relative slack below zero tolerated for the eigenvalues of a covariance
    /// matrix before it is rejected as not positive semidefinite.
    pub psd: f64,
    /// Relative slack tolerated between `Q[i][j]` and `Q[j][i]`.
    pub symmetry: f64,
}

impl Default for NumericTol {
    fn default() -> Self {
        Self {
            rcond: 1e-12,
            psd: 1e-10,
            symmetry: 1e-9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() -> Result<(), serde_json::Error> {
        let tol: NumericTol = serde_json::from_str(r#"{ "rcond": 1e-6 }"#)?;
        assert_eq!(tol.rcond, 1e-6);
        assert_eq!(tol.psd, NumericTol::default().psd);
        assert_eq!(tol.symmetry, NumericTol::default().symmetry);
        Ok(())
    }
}
