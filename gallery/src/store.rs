use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use fete_facevec::FaceRow;

use crate::error::GalleryError;

/// Persists face rows, scoped by event.
///
/// The production implementation belongs to the application layer (a
/// relational store with a vector column); [`MemoryFaceStore`] serves
/// tests and small-scale use. Neither clustering nor matching ever
/// crosses an event boundary, so every method takes the event id.
///
/// Implementations must be safe for concurrent use.
#[async_trait]
pub trait FaceStore: Send + Sync {
    /// Append face rows for an event.
    async fn add_faces(&self, event_id: &str, rows: Vec<FaceRow>) -> Result<(), GalleryError>;

    /// Return every face row of one event, photo URLs joined in.
    async fn faces_for_event(&self, event_id: &str) -> Result<Vec<FaceRow>, GalleryError>;

    /// Remove all face rows of one photo (cascade on photo deletion).
    /// No error if the photo has none.
    async fn delete_photo(&self, event_id: &str, photo_id: &str) -> Result<(), GalleryError>;
}

/// In-memory [`FaceStore`]. Data is lost on restart.
pub struct MemoryFaceStore {
    events: RwLock<HashMap<String, Vec<FaceRow>>>,
}

impl MemoryFaceStore {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryFaceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FaceStore for MemoryFaceStore {
    async fn add_faces(&self, event_id: &str, rows: Vec<FaceRow>) -> Result<(), GalleryError> {
        let mut events = self.events.write().unwrap();
        events.entry(event_id.to_string()).or_default().extend(rows);
        Ok(())
    }

    async fn faces_for_event(&self, event_id: &str) -> Result<Vec<FaceRow>, GalleryError> {
        let events = self.events.read().unwrap();
        Ok(events.get(event_id).cloned().unwrap_or_default())
    }

    async fn delete_photo(&self, event_id: &str, photo_id: &str) -> Result<(), GalleryError> {
        let mut events = self.events.write().unwrap();
        if let Some(rows) = events.get_mut(event_id) {
            rows.retain(|r| r.photo_id != photo_id);
        }
        Ok(())
    }
}
