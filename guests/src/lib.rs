//! Groups the faces of one event into clusters representing distinct
//! guests, without knowing the number of guests in advance.
//!
//! The clusterer is a greedy online method: each face is assigned to the
//! nearest existing cluster centroid, or opens a new cluster when nothing
//! scores above the join threshold. This costs O(n*k) for n faces and k
//! clusters-so-far instead of the O(n^2) of pairwise methods, which is
//! acceptable because k stays small relative to n in a typical event.
//!
//! Clusters are recomputed from scratch on every call; their IDs carry no
//! meaning across runs.

mod cluster;

pub use cluster::{ClusterConfig, GuestCluster, cluster_faces};
