//! Shared face-embedding primitives: the similarity metric and the
//! normalization step that guards all inputs.
//!
//! Every face detected in an event photo is stored as a 128-dimensional
//! f32 vector. The vector column has two historical representations
//! (native float arrays and bracketed text), so all consumers go through
//! [`parse_embedding`] / [`normalize_faces`] before comparing anything.
//! Records that fail validation are dropped, never padded or truncated.

pub mod cosine;
pub mod embedding;
pub mod error;
pub mod record;

pub use cosine::cosine_similarity;
pub use embedding::{EMBEDDING_DIM, RawEmbedding, parse_embedding};
pub use error::FaceVecError;
pub use record::{BoundingBox, FaceRecord, FaceRow, normalize_faces};
