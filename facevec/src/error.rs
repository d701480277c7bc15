use thiserror::Error;

/// Errors returned by embedding validation.
#[derive(Debug, Error)]
pub enum FaceVecError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("non-finite component at index {index}")]
    NonFinite { index: usize },

    #[error("malformed embedding: {0}")]
    Malformed(String),
}
