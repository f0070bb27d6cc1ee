//! Geometric leg detection engine.
//!
//! Reference implementation of [`DetectionEngine`] that finds legs from
//! segment geometry alone:
//!
//! ```text
//! PointCloud → jump-distance segments → per-segment features
//!            → leg gating against model intervals → leg pairing → LegCluster
//! ```
//!
//! # Model File
//!
//! The model is a TOML file of acceptance intervals:
//!
//! ```toml
//! min_points = 3
//! max_points = 40
//! width = [0.05, 0.25]
//! linearity = [0.003, 0.08]
//! spacing = [0.0, 0.08]
//! max_pair_distance = 0.5
//! allow_single_leg = false
//! ```
//!
//! Which intervals are checked depends on the active [`FeatureSet`]; point
//! count and width are always checked.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::cluster::LegCluster;
use super::engine::{DetectionEngine, FeatureSet};
use super::segmentation::{SegmentFeatures, split_by_jump_distance};
use crate::core::types::PointCloud;
use crate::error::{Error, Result};

/// Closed interval `[min, max]` for one feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange(pub f32, pub f32);

impl FeatureRange {
    /// Check if a value lies inside the interval.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.0 && value <= self.1
    }

    fn is_valid(&self) -> bool {
        self.0.is_finite() && self.1.is_finite() && self.0 <= self.1
    }
}

/// Trained leg model: acceptance intervals for segment features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegModel {
    /// Minimum points per leg segment
    pub min_points: usize,
    /// Maximum points per leg segment
    pub max_points: usize,
    /// Endpoint-to-endpoint width in meters
    pub width: FeatureRange,
    /// RMS deviation from the endpoint chord in meters
    pub linearity: FeatureRange,
    /// Mean spacing of consecutive points in meters
    pub spacing: FeatureRange,
    /// Maximum centroid distance between two legs of one person in meters
    pub max_pair_distance: f32,
    /// Report an unpaired leg as a person
    #[serde(default)]
    pub allow_single_leg: bool,
}

impl LegModel {
    /// Load and validate a model file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let load_error = |reason: String| Error::ModelLoad {
            path: path.to_path_buf(),
            reason,
        };

        let contents = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let model: LegModel = toml::from_str(&contents).map_err(|e| load_error(e.to_string()))?;
        model.validate().map_err(|e| load_error(e.to_string()))?;
        Ok(model)
    }

    /// Check internal consistency of the model.
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.min_points == 0 {
            return Err("min_points must be at least 1");
        }
        if self.max_points < self.min_points {
            return Err("max_points must not be less than min_points");
        }
        if !self.width.is_valid() || !self.linearity.is_valid() || !self.spacing.is_valid() {
            return Err("feature ranges must be finite with min <= max");
        }
        if self.max_pair_distance.is_nan() || self.max_pair_distance <= 0.0 {
            return Err("max_pair_distance must be positive");
        }
        Ok(())
    }
}

impl Default for LegModel {
    fn default() -> Self {
        Self {
            min_points: 3,
            max_points: 40,
            width: FeatureRange(0.05, 0.25),
            linearity: FeatureRange(0.003, 0.08),
            spacing: FeatureRange(0.0, 0.08),
            max_pair_distance: 0.5,
            allow_single_leg: false,
        }
    }
}

/// Leg segment accepted by the model.
#[derive(Debug, Clone, Copy)]
struct LegCandidate {
    start: usize,
    end: usize,
    features: SegmentFeatures,
}

/// Geometric leg detection engine.
pub struct GeometricLegEngine {
    segmentation_distance: f32,
    features: FeatureSet,
    model: Option<LegModel>,
}

impl GeometricLegEngine {
    /// Engine name used in configuration.
    pub const NAME: &'static str = "geometric";

    /// Create an engine without a model. [`DetectionEngine::load_model`]
    /// must succeed before detection.
    pub fn new(segmentation_distance: f32) -> Self {
        Self {
            segmentation_distance,
            features: FeatureSet::All,
            model: None,
        }
    }

    /// Create an engine with an already loaded model.
    pub fn with_model(segmentation_distance: f32, model: LegModel) -> Self {
        Self {
            model: Some(model),
            ..Self::new(segmentation_distance)
        }
    }

    /// Active feature set.
    pub fn feature_set(&self) -> FeatureSet {
        self.features
    }

    /// Loaded model, if any.
    pub fn model(&self) -> Option<&LegModel> {
        self.model.as_ref()
    }

    fn is_leg(&self, model: &LegModel, f: &SegmentFeatures) -> bool {
        if f.num_points < model.min_points || f.num_points > model.max_points {
            return false;
        }
        if !model.width.contains(f.width) {
            return false;
        }
        if self.features.uses_shape() && !model.linearity.contains(f.linearity) {
            return false;
        }
        if self.features.uses_spacing() && !model.spacing.contains(f.mean_spacing) {
            return false;
        }
        true
    }

    fn find_legs(&self, model: &LegModel, cloud: &PointCloud) -> Vec<LegCandidate> {
        split_by_jump_distance(&cloud.points, self.segmentation_distance)
            .into_iter()
            .filter_map(|(start, end)| {
                let features = SegmentFeatures::compute(&cloud.points[start..end])?;
                self.is_leg(model, &features).then_some(LegCandidate {
                    start,
                    end,
                    features,
                })
            })
            .collect()
    }
}

impl DetectionEngine for GeometricLegEngine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn set_feature_set(&mut self, features: FeatureSet) {
        self.features = features;
    }

    fn load_model(&mut self, path: &Path) -> Result<()> {
        let model = LegModel::from_file(path)?;
        log::info!(
            "Loaded leg model from {} (width {:.2}-{:.2} m, pair distance {:.2} m)",
            path.display(),
            model.width.0,
            model.width.1,
            model.max_pair_distance
        );
        self.model = Some(model);
        Ok(())
    }

    fn detect_people(&mut self, cloud: &PointCloud) -> Result<Vec<LegCluster>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| Error::Engine("no model loaded".to_string()))?;

        let legs = self.find_legs(model, cloud);
        log::debug!("{} leg candidates in {} points", legs.len(), cloud.len());

        let mut clusters = Vec::new();
        let mut i = 0;
        while i < legs.len() {
            let leg = &legs[i];
            let partner = legs.get(i + 1).filter(|next| {
                leg.features.centroid.distance(&next.features.centroid) <= model.max_pair_distance
            });

            match partner {
                Some(next) => {
                    let mut points = cloud.points[leg.start..leg.end].to_vec();
                    points.extend_from_slice(&cloud.points[next.start..next.end]);
                    clusters.push(LegCluster::from_points(points));
                    i += 2;
                }
                None => {
                    if model.allow_single_leg {
                        clusters.push(LegCluster::from_points(
                            cloud.points[leg.start..leg.end].to_vec(),
                        ));
                    }
                    i += 1;
                }
            }
        }

        Ok(clusters)
    }
}
