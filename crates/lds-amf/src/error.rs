use thiserror::Error;

/// An error type for the factorization initialization rules.
#[derive(Error, Debug, PartialEq)]
pub enum AmfError {
    /// The input matrix has a zero dimension.
    #[error("Cannot initialize a factorization of an empty {rows}x{cols} matrix")]
    EmptyMatrix {
        /// Number of rows of the input.
        rows: usize,
        /// Number of columns of the input.
        cols: usize,
    },

    /// The factorization rank must be at least 1.
    #[error("Invalid factorization rank {0}")]
    InvalidRank(usize),

    /// Average initialization needs at least one nonzero entry.
    #[error("The input matrix has no nonzero entries")]
    NoNonzeroEntries,
}
