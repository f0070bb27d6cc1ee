//! DetectionEngine trait definition and engine factory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::cluster::LegCluster;
use super::geometric::GeometricLegEngine;
use crate::core::types::PointCloud;
use crate::error::{Error, Result};

/// Feature subset an engine evaluates per segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureSet {
    /// Every feature the engine knows about
    #[default]
    All,
    /// Segment size only (point count and width)
    Extent,
    /// Size plus shape (linearity)
    ExtentShape,
}

impl FeatureSet {
    /// Map the configured feature-mix selector to a feature set.
    ///
    /// Unknown selectors fall back to [`FeatureSet::All`].
    pub fn from_mix(mix: u8) -> Self {
        match mix {
            0 => FeatureSet::All,
            1 => FeatureSet::Extent,
            2 => FeatureSet::ExtentShape,
            other => {
                log::warn!("Unknown feature mix {}, using all features", other);
                FeatureSet::All
            }
        }
    }

    /// Whether shape features (linearity) are evaluated.
    #[inline]
    pub fn uses_shape(self) -> bool {
        matches!(self, FeatureSet::All | FeatureSet::ExtentShape)
    }

    /// Whether point spacing is evaluated.
    #[inline]
    pub fn uses_spacing(self) -> bool {
        matches!(self, FeatureSet::All)
    }
}

/// Detection engine configuration, immutable after startup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Engine implementation name
    pub engine: String,
    /// Path of the trained model file
    pub model_file: PathBuf,
    /// Maximum gap between consecutive points of one segment in meters
    pub segmentation_distance: f32,
    /// Feature-mix selector (0 = all features)
    pub feature_mix: u8,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            engine: GeometricLegEngine::NAME.to_string(),
            model_file: PathBuf::from("MODEL_FILE_NOT_SET"),
            segmentation_distance: 0.2,
            feature_mix: 0,
        }
    }
}

impl DetectorConfig {
    /// Feature set selected by `feature_mix`.
    pub fn feature_set(&self) -> FeatureSet {
        FeatureSet::from_mix(self.feature_mix)
    }
}

/// Person detection engine over 2D point clouds.
///
/// The engine is a black box to the rest of the pipeline: it receives a
/// point cloud and returns leg clusters. Model state is loaded once at
/// startup and read-only afterwards.
pub trait DetectionEngine: Send {
    /// Engine name for diagnostics.
    fn name(&self) -> &'static str;

    /// Select which features the engine evaluates.
    fn set_feature_set(&mut self, features: FeatureSet);

    /// Load the trained model from `path`.
    fn load_model(&mut self, path: &Path) -> Result<()>;

    /// Detect people in one point cloud.
    ///
    /// An empty result is a normal outcome. `Err` means the engine itself
    /// failed on this cloud.
    fn detect_people(&mut self, cloud: &PointCloud) -> Result<Vec<LegCluster>>;
}

/// Create a detection engine based on configuration
pub fn create_engine(config: &DetectorConfig) -> Result<Box<dyn DetectionEngine>> {
    match config.engine.as_str() {
        GeometricLegEngine::NAME => {
            let engine = GeometricLegEngine::new(config.segmentation_distance);
            Ok(Box::new(engine))
        }
        _ => Err(Error::UnknownEngine(config.engine.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_mix_mapping() {
        assert_eq!(FeatureSet::from_mix(0), FeatureSet::All);
        assert_eq!(FeatureSet::from_mix(1), FeatureSet::Extent);
        assert_eq!(FeatureSet::from_mix(2), FeatureSet::ExtentShape);
        assert_eq!(FeatureSet::from_mix(9), FeatureSet::All);
    }

    #[test]
    fn test_feature_gates() {
        assert!(FeatureSet::All.uses_shape());
        assert!(FeatureSet::All.uses_spacing());
        assert!(!FeatureSet::Extent.uses_shape());
        assert!(FeatureSet::ExtentShape.uses_shape());
        assert!(!FeatureSet::ExtentShape.uses_spacing());
    }

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.engine, "geometric");
        assert_eq!(config.segmentation_distance, 0.2);
        assert_eq!(config.feature_mix, 0);
        assert_eq!(config.model_file, PathBuf::from("MODEL_FILE_NOT_SET"));
    }

    #[test]
    fn test_create_unknown_engine() {
        let config = DetectorConfig {
            engine: "people2d".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            create_engine(&config),
            Err(Error::UnknownEngine(name)) if name == "people2d"
        ));
    }

    #[test]
    fn test_create_geometric_engine() {
        let engine = create_engine(&DetectorConfig::default()).unwrap();
        assert_eq!(engine.name(), "geometric");
    }
}
