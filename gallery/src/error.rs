use thiserror::Error;

use fete_matcher::MatchError;

/// Errors returned by gallery operations.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("store error: {0}")]
    Store(String),

    #[error("extractor error: {0}")]
    Extractor(String),

    #[error("extractor dimension mismatch: expected {expected}, got {got}")]
    ExtractorDimension { expected: usize, got: usize },

    #[error("invalid query embedding: {0}")]
    InvalidQuery(String),
}

impl From<MatchError> for GalleryError {
    fn from(e: MatchError) -> Self {
        match e {
            MatchError::InvalidQuery(msg) => GalleryError::InvalidQuery(msg),
        }
    }
}
