//! Detection adapter: engine lifecycle and the per-frame detect call.

use super::cluster::LegCluster;
use super::engine::{DetectionEngine, DetectorConfig, create_engine};
use crate::core::types::PointCloud;
use crate::error::{Error, Result};

/// Owns a loaded detection engine for the lifetime of the process.
///
/// Construction is the only fallible step. Once an adapter exists, its model
/// is loaded and [`DetectionAdapter::detect`] never fails.
pub struct DetectionAdapter {
    engine: Box<dyn DetectionEngine>,
    config: DetectorConfig,
}

impl std::fmt::Debug for DetectionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionAdapter")
            .field("engine", &self.engine.name())
            .field("config", &self.config)
            .finish()
    }
}

impl DetectionAdapter {
    /// Create the configured engine, select its feature set and load its model.
    ///
    /// Every failure is reported as [`Error::ModelLoad`]: without a model no
    /// detection is meaningful and the caller should stop.
    pub fn initialize(config: DetectorConfig) -> Result<Self> {
        let engine = create_engine(&config).map_err(|e| Error::ModelLoad {
            path: config.model_file.clone(),
            reason: e.to_string(),
        })?;
        Self::with_engine(engine, config)
    }

    /// Prepare an externally constructed engine.
    pub fn with_engine(mut engine: Box<dyn DetectionEngine>, config: DetectorConfig) -> Result<Self> {
        let features = config.feature_set();
        engine.set_feature_set(features);

        engine.load_model(&config.model_file).map_err(|e| match e {
            Error::ModelLoad { .. } => e,
            other => Error::ModelLoad {
                path: config.model_file.clone(),
                reason: other.to_string(),
            },
        })?;

        log::info!(
            "Detection engine '{}' ready (model {}, segmentation {:.2} m, features {:?})",
            engine.name(),
            config.model_file.display(),
            config.segmentation_distance,
            features
        );

        Ok(Self { engine, config })
    }

    /// Detect leg clusters in one point cloud.
    ///
    /// Engine failures are logged and reported as an empty detection so the
    /// frame loop keeps running.
    pub fn detect(&mut self, cloud: &PointCloud) -> Vec<LegCluster> {
        match self.engine.detect_people(cloud) {
            Ok(clusters) => clusters,
            Err(e) => {
                log::warn!(
                    "Detection engine '{}' failed on scan {}: {}",
                    self.engine.name(),
                    cloud.stamp_us,
                    e
                );
                Vec::new()
            }
        }
    }

    /// Configuration the engine was initialized with.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Name of the wrapped engine.
    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }
}
