//! Test utilities for pada-detect integration tests.
//!
//! Synthetic scans, scripted detection engines and channel-backed sinks.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Write;
use std::path::Path;

use crossbeam_channel::{Receiver, unbounded};
use pada_detect::io::{ChannelSink, Envelope, Message};
use pada_detect::{
    DetectionAdapter, DetectionEngine, DetectorConfig, Error, FanoutSinks, FeatureSet,
    FrameDriver, LegCluster, PersonAggregator, Point2D, PointCloud, PublicationConfig,
    PublicationFanout, Result, ScanEvent, ScanSanitizer,
};
use tempfile::NamedTempFile;

// ============================================================================
// Synthetic scans
// ============================================================================

/// Angular resolution of the synthetic scanner (~0.5°).
pub const ANGLE_INCREMENT: f32 = 0.0087;
pub const ANGLE_MIN: f32 = -0.5;
pub const NUM_READINGS: usize = 115;
pub const BACKGROUND_RANGE: f32 = 5.0;
pub const LEG_RADIUS: f32 = 0.06;

/// Range along bearing `theta` to the nearest of `legs` (circle centres),
/// or the background wall if none is hit.
fn ray_range(theta: f32, legs: &[(f32, f32)]) -> f32 {
    let (dx, dy) = (theta.cos(), theta.sin());
    legs.iter()
        .filter_map(|&(cx, cy)| {
            let b = dx * cx + dy * cy;
            let disc = b * b - (cx * cx + cy * cy - LEG_RADIUS * LEG_RADIUS);
            (disc >= 0.0).then(|| b - disc.sqrt())
        })
        .fold(BACKGROUND_RANGE, f32::min)
}

/// Scan of a person standing 1.5 m ahead: two legs ~0.3 m apart in front of
/// a wall at 5 m.
pub fn person_scan(stamp_us: u64) -> ScanEvent {
    let centre = 1.5 + LEG_RADIUS;
    let legs = [
        (centre * (-0.1f32).cos(), centre * (-0.1f32).sin()),
        (centre * 0.1f32.cos(), centre * 0.1f32.sin()),
    ];
    let ranges = (0..NUM_READINGS)
        .map(|i| ray_range(ANGLE_MIN + i as f32 * ANGLE_INCREMENT, &legs))
        .collect();
    ScanEvent::new(stamp_us, ANGLE_MIN, ANGLE_INCREMENT, 0.05, 8.0, ranges)
        .with_frame_id("hokuyo_link")
}

/// Scan of the bare wall.
pub fn empty_room_scan(stamp_us: u64) -> ScanEvent {
    ScanEvent::new(
        stamp_us,
        ANGLE_MIN,
        ANGLE_INCREMENT,
        0.05,
        8.0,
        vec![BACKGROUND_RANGE; NUM_READINGS],
    )
}

/// Write a model file for the geometric engine.
pub fn write_model() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
min_points = 3
max_points = 40
width = [0.05, 0.25]
linearity = [0.003, 0.08]
spacing = [0.0, 0.08]
max_pair_distance = 0.5
allow_single_leg = false
"#
    )
    .unwrap();
    file
}

pub fn geometric_config(model: &Path) -> DetectorConfig {
    DetectorConfig {
        model_file: model.to_path_buf(),
        ..Default::default()
    }
}

// ============================================================================
// Scripted engine
// ============================================================================

/// Engine that replays scripted detection results, then returns nothing.
pub struct ScriptedEngine {
    script: VecDeque<Result<Vec<LegCluster>>>,
}

impl ScriptedEngine {
    pub fn new(script: Vec<Result<Vec<LegCluster>>>) -> Self {
        Self {
            script: script.into(),
        }
    }

    /// Detect the given cluster centres on every frame of the script.
    pub fn centres(frames: usize, centres: &[(f32, f32)]) -> Self {
        let clusters = clusters_at(centres);
        Self::new((0..frames).map(|_| Ok(clusters.clone())).collect())
    }
}

impl DetectionEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn set_feature_set(&mut self, _features: FeatureSet) {}

    fn load_model(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn detect_people(&mut self, _cloud: &PointCloud) -> Result<Vec<LegCluster>> {
        self.script.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Single-point clusters at the given centres.
pub fn clusters_at(centres: &[(f32, f32)]) -> Vec<LegCluster> {
    centres
        .iter()
        .map(|&(x, y)| LegCluster::from_points(vec![Point2D::new(x, y)]))
        .collect()
}

/// Scripted result for an engine failure.
pub fn engine_failure() -> Result<Vec<LegCluster>> {
    Err(Error::Engine("scripted failure".to_string()))
}

// ============================================================================
// Channel outputs
// ============================================================================

/// Receiving ends of the five output topics.
pub struct Outputs {
    pub marker: Receiver<Envelope>,
    pub text: Receiver<Envelope>,
    pub people: Receiver<Envelope>,
    pub measurements: Receiver<Envelope>,
    pub scan_markers: Receiver<Envelope>,
}

impl Outputs {
    /// Messages waiting on the four person topics.
    pub fn person_topic_count(&self) -> usize {
        self.marker.len() + self.text.len() + self.people.len() + self.measurements.len()
    }

    pub fn drain(rx: &Receiver<Envelope>) -> Vec<Message> {
        rx.try_iter().map(|e| e.message).collect()
    }
}

pub fn channel_fanout(config: &PublicationConfig) -> (PublicationFanout, Outputs) {
    let (marker_tx, marker) = unbounded();
    let (text_tx, text) = unbounded();
    let (people_tx, people) = unbounded();
    let (meas_tx, measurements) = unbounded();
    let (scan_tx, scan_markers) = unbounded();
    let sinks = FanoutSinks {
        marker: Box::new(ChannelSink::new("visualization_marker", marker_tx)),
        text: Box::new(ChannelSink::new("laser_person", text_tx)),
        people: Box::new(ChannelSink::new("/leg_persons", people_tx)),
        measurements: Box::new(ChannelSink::new("people_tracker_measurements", meas_tx)),
        scan_markers: Some(Box::new(ChannelSink::new("visualization_scan", scan_tx))),
    };
    (
        PublicationFanout::new(sinks, config),
        Outputs {
            marker,
            text,
            people,
            measurements,
            scan_markers,
        },
    )
}

/// Frame driver around `engine` publishing to channels.
pub fn channel_driver(engine: Box<dyn DetectionEngine>) -> (FrameDriver, Outputs) {
    let adapter = DetectionAdapter::with_engine(engine, DetectorConfig::default()).unwrap();
    let (fanout, outputs) = channel_fanout(&PublicationConfig::default());
    let driver = FrameDriver::new(
        ScanSanitizer::new(1),
        adapter,
        PersonAggregator::new(),
        fanout,
    );
    (driver, outputs)
}
