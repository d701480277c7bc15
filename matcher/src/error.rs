use thiserror::Error;

/// Errors returned by match operations.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The caller-supplied query embedding failed validation. A contract
    /// violation, not a data-quality issue: the request fails
    /// immediately and nothing is retried.
    #[error("invalid query embedding: {0}")]
    InvalidQuery(String),
}
