use serde::{Deserialize, Serialize};

use crate::error::FaceVecError;

/// Output dimension of the face embedding extractor.
pub const EMBEDDING_DIM: usize = 128;

/// A face embedding as it arrives from storage.
///
/// The vector column has two historical representations: a native float
/// array, or a bracketed comma-separated string produced by textual
/// vector serialization (e.g. `"[0.1, -0.2, ...]"`). [`parse_embedding`]
/// resolves both into a validated `Vec<f32>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEmbedding {
    Vector(Vec<f32>),
    Text(String),
}

/// Parse and validate a raw embedding.
///
/// Rejects the whole value (never truncates, pads, or defaults):
/// - any length other than [`EMBEDDING_DIM`]
/// - any component that is not a finite number
/// - a textual form that is not a bracketed comma-separated list
pub fn parse_embedding(raw: &RawEmbedding) -> Result<Vec<f32>, FaceVecError> {
    match raw {
        RawEmbedding::Vector(v) => validate(v.clone()),
        RawEmbedding::Text(s) => parse_text(s),
    }
}

fn validate(v: Vec<f32>) -> Result<Vec<f32>, FaceVecError> {
    if v.len() != EMBEDDING_DIM {
        return Err(FaceVecError::DimensionMismatch {
            expected: EMBEDDING_DIM,
            got: v.len(),
        });
    }
    if let Some(index) = v.iter().position(|x| !x.is_finite()) {
        return Err(FaceVecError::NonFinite { index });
    }
    Ok(v)
}

fn parse_text(s: &str) -> Result<Vec<f32>, FaceVecError> {
    let inner = s
        .trim()
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| FaceVecError::Malformed("missing brackets".into()))?;

    let mut out = Vec::with_capacity(EMBEDDING_DIM);
    for part in inner.split(',') {
        let part = part.trim();
        let n: f32 = part
            .parse()
            .map_err(|_| FaceVecError::Malformed(format!("bad component {part:?}")))?;
        if !n.is_finite() {
            return Err(FaceVecError::NonFinite { index: out.len() });
        }
        out.push(n);
    }
    if out.len() != EMBEDDING_DIM {
        return Err(FaceVecError::DimensionMismatch {
            expected: EMBEDDING_DIM,
            got: out.len(),
        });
    }
    Ok(out)
}
