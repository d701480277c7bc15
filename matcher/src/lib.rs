//! Finds the photos a guest appears in: one query embedding from a live
//! selfie against every stored face of one event, ranked best first.
//!
//! The matcher is a bounded brute-force scan: candidate sets are capped
//! per event, so no approximate index is involved. It is pure and
//! synchronous; fetching the scoped candidate rows is the caller's job.

mod error;
mod matcher;

pub use error::MatchError;
pub use matcher::{MatchConfig, PhotoMatch, match_photos};
