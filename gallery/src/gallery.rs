use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};
use uuid::Uuid;

use fete_facevec::{EMBEDDING_DIM, FaceRow, RawEmbedding};
use fete_guests::{ClusterConfig, GuestCluster, cluster_faces};
use fete_matcher::{MatchConfig, PhotoMatch, match_photos};

use crate::error::GalleryError;
use crate::extractor::{DetectedFace, FaceExtractor};
use crate::store::FaceStore;

/// Cap on faces considered by one clustering run. Keeps the O(n*k) pass
/// bounded for very large events.
pub const DEFAULT_MAX_FACES: usize = 4000;

/// Entry points for one gallery deployment: ingesting processed photos
/// and answering the two guest-facing questions, "who is in this
/// event's photos" and "which photos am I in".
///
/// Holds no mutable state of its own; every call fetches fresh rows from
/// the store, so concurrent calls never share accumulators.
pub struct GuestGallery {
    store: Arc<dyn FaceStore>,
    cluster_cfg: ClusterConfig,
    match_cfg: MatchConfig,
    max_faces: usize,
}

impl GuestGallery {
    pub fn new(store: Arc<dyn FaceStore>) -> Self {
        Self {
            store,
            cluster_cfg: ClusterConfig::default(),
            match_cfg: MatchConfig::default(),
            max_faces: DEFAULT_MAX_FACES,
        }
    }

    pub fn with_configs(
        store: Arc<dyn FaceStore>,
        cluster_cfg: ClusterConfig,
        match_cfg: MatchConfig,
        max_faces: usize,
    ) -> Self {
        Self {
            store,
            cluster_cfg,
            match_cfg,
            max_faces,
        }
    }

    /// Run the extraction oracle over one uploaded photo and persist a
    /// face row per detection. Returns the number of faces found; zero
    /// is a success (not every photo has a face).
    pub async fn ingest_photo(
        &self,
        extractor: &dyn FaceExtractor,
        event_id: &str,
        photo_id: &str,
        photo_url: &str,
        image: &[u8],
    ) -> Result<usize, GalleryError> {
        if extractor.dimension() != EMBEDDING_DIM {
            return Err(GalleryError::ExtractorDimension {
                expected: EMBEDDING_DIM,
                got: extractor.dimension(),
            });
        }

        let detections = extractor.extract(image)?;
        let count = detections.len();
        if count == 0 {
            debug!(event_id, photo_id, "no faces found");
            return Ok(0);
        }

        let rows: Vec<FaceRow> = detections
            .into_iter()
            .map(|d| face_row(photo_id, photo_url, d))
            .collect();
        self.store.add_faces(event_id, rows).await?;
        debug!(event_id, photo_id, faces = count, "photo ingested");
        Ok(count)
    }

    /// Cluster every face of one event into guests, largest guest first.
    ///
    /// Malformed stored embeddings are dropped (and counted in the debug
    /// log), never fatal.
    pub async fn guest_clusters(&self, event_id: &str) -> Result<Vec<GuestCluster>, GalleryError> {
        let started = Instant::now();
        let mut rows = self.store.faces_for_event(event_id).await?;
        if rows.len() > self.max_faces {
            warn!(
                event_id,
                total = rows.len(),
                cap = self.max_faces,
                "face set truncated for clustering"
            );
            rows.truncate(self.max_faces);
        }

        let clusters = cluster_faces(&rows, &self.cluster_cfg);
        let clustered: usize = clusters.iter().map(|c| c.face_count).sum();
        debug!(
            event_id,
            rows = rows.len(),
            dropped = rows.len() - clustered,
            clusters = clusters.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "guest clustering done"
        );
        Ok(clusters)
    }

    /// Find the photos a guest appears in, from a selfie embedding.
    ///
    /// The candidate fetch is scoped to the event before any scoring;
    /// whether the caller may search this event at all is decided
    /// upstream. An event with no faces yields an empty result.
    pub async fn find_guest_photos(
        &self,
        event_id: &str,
        selfie: &[f32],
    ) -> Result<Vec<PhotoMatch>, GalleryError> {
        let started = Instant::now();
        let rows = self.store.faces_for_event(event_id).await?;
        let matches = match_photos(selfie, &rows, &self.match_cfg)?;
        debug!(
            event_id,
            candidates = rows.len(),
            matches = matches.len(),
            threshold = f64::from(self.match_cfg.threshold),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "selfie match done"
        );
        Ok(matches)
    }
}

fn face_row(photo_id: &str, photo_url: &str, d: DetectedFace) -> FaceRow {
    // Detectors may nudge a box past the image edge; coordinates are
    // stored as non-negative integers.
    let px = |v: f32| v.round().max(0.0) as u32;
    FaceRow {
        id: Uuid::new_v4().to_string(),
        photo_id: photo_id.to_string(),
        photo_url: photo_url.to_string(),
        embedding: RawEmbedding::Vector(d.embedding),
        box_x: Some(px(d.bounding_box.x)),
        box_y: Some(px(d.bounding_box.y)),
        box_width: Some(px(d.bounding_box.width)),
        box_height: Some(px(d.bounding_box.height)),
    }
}
