use crate::error::GalleryError;

/// Detection box as produced by the model, in float pixel coordinates.
/// Rounded to integers at ingestion.
#[derive(Debug, Clone, Copy)]
pub struct DetectionBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One face found by the detection oracle in a single image.
#[derive(Debug, Clone)]
pub struct DetectedFace {
    /// Raw embedding as produced by the model.
    pub embedding: Vec<f32>,

    /// Where the face sits in the source image.
    pub bounding_box: DetectionBox,
}

/// Extracts face embeddings from encoded image bytes.
///
/// The neural network behind this trait is an external oracle; model
/// loading and session readiness are the implementation's own state,
/// never ambient globals of this workspace.
///
/// Implementations must be safe for concurrent use.
pub trait FaceExtractor: Send + Sync {
    /// Detect faces and compute one embedding per face.
    /// Zero detections is a valid outcome, not an error.
    fn extract(&self, image: &[u8]) -> Result<Vec<DetectedFace>, GalleryError>;

    /// Dimensionality of the produced embeddings.
    fn dimension(&self) -> usize;
}
