use thiserror::Error;

/// Precondition violations reported by the fallible parts of the API.
///
/// An inconsistent linear system is *not* an error: [`crate::BitMatrix::x_for`] reports it as
/// `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("bit index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("entry ({row}, {col}) out of range for a {rows}x{cols} matrix")]
    MatrixIndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("matrix is not invertible")]
    Singular,
}

pub type Result<T> = std::result::Result<T, Error>;
