use std::collections::HashMap;

use serde::Serialize;

use fete_facevec::{FaceRow, RawEmbedding, cosine_similarity, parse_embedding};

use crate::error::MatchError;

/// Controls match behavior.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Minimum cosine similarity for a face to count as a match
    /// (strictly above). Deliberately lower than the clustering join
    /// threshold: a missed photo is worse for the guest experience than
    /// an occasional stray match. Default: 0.4.
    pub threshold: f32,

    /// Maximum number of photos returned. Default: 50.
    pub limit: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            limit: 50,
        }
    }
}

/// One matched photo, scored by its best-matching face.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoMatch {
    pub photo_id: String,
    pub photo_url: String,
    pub similarity: f32,
}

/// Return all photos in the candidate set with a face scoring strictly
/// above the similarity threshold, best first, capped at `limit`.
///
/// `candidates` must already be scoped to one event and to what the
/// caller is authorized to search; this function never decides
/// visibility. Scoring is per face: a photo with several matching faces
/// appears once, scored by its best face. Malformed candidate rows are
/// skipped; an invalid query embedding fails the whole request. An empty
/// candidate set yields an empty result.
pub fn match_photos(
    query: &[f32],
    candidates: &[FaceRow],
    cfg: &MatchConfig,
) -> Result<Vec<PhotoMatch>, MatchError> {
    parse_embedding(&RawEmbedding::Vector(query.to_vec()))
        .map_err(|e| MatchError::InvalidQuery(e.to_string()))?;

    // Best face per photo.
    let mut best: HashMap<&str, (&str, f32)> = HashMap::new();
    for row in candidates {
        let Ok(embedding) = parse_embedding(&row.embedding) else {
            continue;
        };
        let sim = cosine_similarity(query, &embedding);
        if sim <= cfg.threshold {
            continue;
        }
        let entry = best
            .entry(row.photo_id.as_str())
            .or_insert((row.photo_url.as_str(), sim));
        if sim > entry.1 {
            *entry = (row.photo_url.as_str(), sim);
        }
    }

    let mut matches: Vec<PhotoMatch> = best
        .into_iter()
        .map(|(photo_id, (photo_url, similarity))| PhotoMatch {
            photo_id: photo_id.to_string(),
            photo_url: photo_url.to_string(),
            similarity,
        })
        .collect();

    // Descending similarity; photo id breaks ties so hash-map iteration
    // order cannot leak into results.
    matches.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.photo_id.cmp(&b.photo_id))
    });
    matches.truncate(cfg.limit);
    Ok(matches)
}
