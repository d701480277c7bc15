use serde::{Deserialize, Serialize};

use crate::embedding::{RawEmbedding, parse_embedding};

/// Face detection box in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One `photo_faces` row as fetched from the store, with the owning
/// photo's display URL joined in by the caller's fetch.
///
/// Rows are written once at ingestion and never updated; they disappear
/// only when the owning photo is deleted. Box columns are nullable:
/// rows ingested before box capture have none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceRow {
    pub id: String,
    pub photo_id: String,
    pub photo_url: String,
    pub embedding: RawEmbedding,
    #[serde(default)]
    pub box_x: Option<u32>,
    #[serde(default)]
    pub box_y: Option<u32>,
    #[serde(default)]
    pub box_width: Option<u32>,
    #[serde(default)]
    pub box_height: Option<u32>,
}

impl FaceRow {
    /// Assemble the detection box, if all four coordinates are present.
    /// Partial boxes degrade to `None` rather than being zero-filled.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        Some(BoundingBox {
            x: self.box_x?,
            y: self.box_y?,
            width: self.box_width?,
            height: self.box_height?,
        })
    }
}

/// A face record whose embedding has been parsed and validated:
/// exactly [`crate::EMBEDDING_DIM`] finite components.
#[derive(Debug, Clone)]
pub struct FaceRecord {
    pub id: String,
    pub photo_id: String,
    pub photo_url: String,
    pub embedding: Vec<f32>,
    pub bounding_box: Option<BoundingBox>,
}

/// Normalize raw rows into validated records.
///
/// Rows whose embedding fails validation are dropped. Callers that care
/// about data quality compare input and output lengths.
pub fn normalize_faces(rows: &[FaceRow]) -> Vec<FaceRecord> {
    rows.iter()
        .filter_map(|row| {
            let embedding = parse_embedding(&row.embedding).ok()?;
            Some(FaceRecord {
                id: row.id.clone(),
                photo_id: row.photo_id.clone(),
                photo_url: row.photo_url.clone(),
                embedding,
                bounding_box: row.bounding_box(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EMBEDDING_DIM;

    fn row(id: &str, photo_id: &str, embedding: RawEmbedding) -> FaceRow {
        FaceRow {
            id: id.to_string(),
            photo_id: photo_id.to_string(),
            photo_url: format!("https://cdn.example/{photo_id}.jpg"),
            embedding,
            box_x: None,
            box_y: None,
            box_width: None,
            box_height: None,
        }
    }

    #[test]
    fn normalize_keeps_valid_drops_malformed() {
        let rows = vec![
            row("f1", "p1", RawEmbedding::Vector(vec![0.1; EMBEDDING_DIM])),
            row("f2", "p1", RawEmbedding::Vector(vec![0.1; 64])),
            row("f3", "p2", RawEmbedding::Text("not a vector".into())),
            row("f4", "p2", RawEmbedding::Vector(vec![0.2; EMBEDDING_DIM])),
        ];

        let records = normalize_faces(&rows);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "f4"]);
        for r in &records {
            assert_eq!(r.embedding.len(), EMBEDDING_DIM);
        }
    }

    #[test]
    fn bounding_box_requires_all_coordinates() {
        let mut r = row("f1", "p1", RawEmbedding::Vector(vec![0.1; EMBEDDING_DIM]));
        assert!(r.bounding_box().is_none());

        r.box_x = Some(10);
        r.box_y = Some(20);
        assert!(r.bounding_box().is_none(), "partial box must not assemble");

        r.box_width = Some(64);
        r.box_height = Some(80);
        assert_eq!(
            r.bounding_box(),
            Some(BoundingBox { x: 10, y: 20, width: 64, height: 80 })
        );
    }

    #[test]
    fn decode_row_with_array_embedding() {
        let components: Vec<String> = (0..EMBEDDING_DIM).map(|i| format!("{}.0", i % 3)).collect();
        let json = format!(
            r#"{{"id":"f1","photo_id":"p1","photo_url":"https://cdn.example/p1.jpg",
                "embedding":[{}],"box_x":1,"box_y":2,"box_width":3,"box_height":4}}"#,
            components.join(",")
        );
        let r: FaceRow = serde_json::from_str(&json).unwrap();
        assert!(matches!(r.embedding, RawEmbedding::Vector(ref v) if v.len() == EMBEDDING_DIM));
        assert_eq!(r.bounding_box().unwrap().width, 3);
    }

    #[test]
    fn decode_row_with_text_embedding_and_missing_box() {
        let components: Vec<String> = (0..EMBEDDING_DIM).map(|_| "0.5".to_string()).collect();
        let json = format!(
            r#"{{"id":"f2","photo_id":"p2","photo_url":"https://cdn.example/p2.jpg",
                "embedding":"[{}]"}}"#,
            components.join(",")
        );
        let r: FaceRow = serde_json::from_str(&json).unwrap();
        assert!(matches!(r.embedding, RawEmbedding::Text(_)));
        assert!(r.bounding_box().is_none());

        let records = normalize_faces(&[r]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].embedding.len(), EMBEDDING_DIM);
    }
}
