use std::collections::HashSet;

use serde::Serialize;

use fete_facevec::{FaceRow, cosine_similarity, normalize_faces};

/// Controls clustering behavior.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Minimum cosine similarity to join an existing cluster.
    /// Lower = more merges, higher = more singleton guests.
    /// Tuned for the 128-d extractor in use; a different extractor
    /// needs re-tuning. Default: 0.58.
    pub threshold: f32,

    /// Maximum number of sample photo URLs emitted per cluster.
    /// Default: 3.
    pub sample_photos: usize,

    /// Prepended to generated cluster IDs (e.g. "guest" -> "guest:001").
    pub id_prefix: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            threshold: 0.58,
            sample_photos: 3,
            id_prefix: "guest".into(),
        }
    }
}

/// A group of faces believed to depict the same person.
///
/// IDs are stable only within one clustering run; nothing persists
/// between runs.
#[derive(Debug, Clone, Serialize)]
pub struct GuestCluster {
    /// Synthetic identifier in creation order (e.g. "guest:001").
    pub id: String,

    /// Member face record IDs, in assignment order.
    pub face_ids: Vec<String>,

    /// Number of member faces.
    pub face_count: usize,

    /// Number of distinct photos the member faces span.
    pub photo_count: usize,

    /// Display URLs of the first-seen distinct photos, in first-seen
    /// order, capped at [`ClusterConfig::sample_photos`].
    pub sample_photo_urls: Vec<String>,
}

struct OpenCluster {
    centroid: Vec<f32>,
    face_ids: Vec<String>,
    photo_ids: HashSet<String>,
    sample_photo_urls: Vec<String>,
}

/// Partition an unordered set of face rows into guest clusters using
/// single-pass nearest-centroid assignment.
///
/// Rows that fail embedding validation are dropped; the run itself never
/// fails, and every valid face lands in exactly one cluster (singletons
/// allowed).
///
/// Grouping (though not centroid arithmetic) depends on traversal
/// order: this is a greedy online method, not a globally optimal
/// clustering. Callers wanting run-to-run stability sort rows by id
/// before calling. Output is sorted by descending face count; the sort is
/// stable, so ties keep creation order.
pub fn cluster_faces(rows: &[FaceRow], cfg: &ClusterConfig) -> Vec<GuestCluster> {
    let faces = normalize_faces(rows);
    let mut clusters: Vec<OpenCluster> = Vec::new();

    for face in &faces {
        let mut best_score = -1.0f32;
        let mut best: Option<usize> = None;
        for (i, cluster) in clusters.iter().enumerate() {
            let sim = cosine_similarity(&face.embedding, &cluster.centroid);
            if sim > best_score {
                best_score = sim;
                best = Some(i);
            }
        }

        match best {
            Some(i) if best_score >= cfg.threshold => {
                let cluster = &mut clusters[i];
                cluster.face_ids.push(face.id.clone());
                if cluster.photo_ids.insert(face.photo_id.clone())
                    && cluster.sample_photo_urls.len() < cfg.sample_photos
                {
                    cluster.sample_photo_urls.push(face.photo_url.clone());
                }

                // Welford running mean; n is the member count after the
                // append, so no sum vector is kept.
                let n = cluster.face_ids.len() as f32;
                for (c, &x) in cluster.centroid.iter_mut().zip(face.embedding.iter()) {
                    *c += (x - *c) / n;
                }
            }
            _ => {
                clusters.push(OpenCluster {
                    centroid: face.embedding.clone(),
                    face_ids: vec![face.id.clone()],
                    photo_ids: HashSet::from([face.photo_id.clone()]),
                    sample_photo_urls: if cfg.sample_photos > 0 {
                        vec![face.photo_url.clone()]
                    } else {
                        Vec::new()
                    },
                });
            }
        }
    }

    let mut out: Vec<GuestCluster> = clusters
        .into_iter()
        .enumerate()
        .map(|(i, c)| GuestCluster {
            id: format!("{}:{:03}", cfg.id_prefix, i + 1),
            face_count: c.face_ids.len(),
            face_ids: c.face_ids,
            photo_count: c.photo_ids.len(),
            sample_photo_urls: c.sample_photo_urls,
        })
        .collect();

    out.sort_by(|a, b| b.face_count.cmp(&a.face_count));
    out
}
