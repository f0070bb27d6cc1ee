//! Person detection layer.
//!
//! The detection engine is a capability boundary: anything implementing
//! [`DetectionEngine`] turns a [`PointCloud`](crate::core::types::PointCloud)
//! into [`LegCluster`]s. The [`DetectionAdapter`] owns the engine's lifecycle
//! (creation, feature selection, model loading) and shields the frame loop
//! from engine failures.
//!
//! ```text
//! DetectorConfig → create_engine → set_feature_set → load_model → DetectionAdapter
//!                                                                   │
//!                          PointCloud ──────────── detect ──────────┴──→ Vec<LegCluster>
//! ```
//!
//! [`GeometricLegEngine`] is the bundled engine; it segments by jump distance
//! and gates segments against a TOML model of feature intervals.

mod adapter;
mod cluster;
mod engine;
mod geometric;
mod segmentation;

pub use adapter::DetectionAdapter;
pub use cluster::LegCluster;
pub use engine::{DetectionEngine, DetectorConfig, FeatureSet, create_engine};
pub use geometric::{FeatureRange, GeometricLegEngine, LegModel};
pub use segmentation::{SegmentFeatures, split_by_jump_distance};
