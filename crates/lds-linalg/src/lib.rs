#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # LDS Matrix Toolkit
//!
//! Composable numeric primitives for assembling the equations of a linear
//! dynamical system
//!
//! ```text
//! x_{t+1} = A x_t + B u_t + w_t
//! y_t     = C x_t + v_t
//! ```
//!
//! with `E[w wᵀ] = Q`, `E[v vᵀ] = R` and `E[w vᵀ] = S`.
//!
//! All index ranges are 0-indexed closed intervals `[start, end]`.
//!
//! ## Example
//!
//! ```rust
//! use lds_linalg::{ops::propagate_one_step, Matrix, Vector};
//!
//! let a = Matrix::from_fn(2, 2, |i, j| if i == j { 1.0 } else { 0.0 });
//! let x = Vector::from_fn(2, |i| (i + 1) as f64);
//! let w = Vector::zeros(2);
//! let v = propagate_one_step(&a, &x, &w).unwrap();
//! assert_eq!(v.read(0), 1.0);
//! assert_eq!(v.read(1), 2.0);
//! ```

/// Sub-matrix extraction, insertion and concatenation.
pub mod block;

/// Diagnostic printing of matrices.
pub mod display;

/// Error types for the toolkit.
///
/// Defines [`LinalgError`] for every failure the operations can report.
pub mod error;

/// The state space model aggregate.
pub mod model;

/// State propagation and the Schur complement.
pub mod ops;

/// Gaussian sampling of vectors.
pub mod sampling;

/// Numeric tolerances shared by the operations.
pub mod tol;

pub use error::LinalgError;
pub use model::StateSpaceModel;
pub use tol::NumericTol;

/// Dense matrix of double precision floats.
pub type Matrix = faer::Mat<f64>;

/// Dense column vector of double precision floats.
pub type Vector = faer::Col<f64>;
