//! Frame driver: one scan in, one synchronous pipeline run out.
//!
//! ```text
//! Idle → Sanitizing → Detecting → Aggregating → Publishing → Idle
//! ```
//!
//! Nothing carries over between frames except the marker id counter owned by
//! the publication fan-out. A malformed scan or a failing engine costs one
//! frame, never the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::aggregation::PersonAggregator;
use crate::core::types::ScanEvent;
use crate::detection::DetectionAdapter;
use crate::error::{Error, Result};
use crate::io::source::ScanSource;
use crate::publication::PublicationFanout;
use crate::sensors::ScanSanitizer;

/// Default wait for the next scan before re-checking the shutdown flag.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Pipeline stage of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Idle,
    Sanitizing,
    Detecting,
    Aggregating,
    Publishing,
}

/// What one frame produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Scan timestamp in microseconds
    pub stamp_us: u64,
    /// Scan rejected before sanitizing
    pub skipped: bool,
    /// Points after sanitizing
    pub points: usize,
    /// Leg clusters returned by the detector
    pub clusters: usize,
    /// Person estimates published
    pub people: usize,
    /// Messages delivered to sinks (person topics and scan markers)
    pub messages: usize,
}

/// Drives scans through sanitize, detect, aggregate and publish.
pub struct FrameDriver<R: Rng = SmallRng> {
    sanitizer: ScanSanitizer<R>,
    adapter: DetectionAdapter,
    aggregator: PersonAggregator,
    fanout: PublicationFanout,
    state: FrameState,
    poll_timeout: Duration,
}

impl<R: Rng> FrameDriver<R> {
    pub fn new(
        sanitizer: ScanSanitizer<R>,
        adapter: DetectionAdapter,
        aggregator: PersonAggregator,
        fanout: PublicationFanout,
    ) -> Self {
        Self {
            sanitizer,
            adapter,
            aggregator,
            fanout,
            state: FrameState::Idle,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Set how long [`run`](Self::run) waits for a scan between shutdown checks.
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Current pipeline stage; `Idle` between frames.
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Publication fan-out (exposed for inspection).
    pub fn fanout(&self) -> &PublicationFanout {
        &self.fanout
    }

    fn transition(&mut self, next: FrameState) {
        log::trace!("Frame state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Run the full pipeline for one scan.
    pub fn process_scan(&mut self, scan: &ScanEvent) -> FrameReport {
        let mut report = FrameReport {
            stamp_us: scan.stamp_us,
            ..Default::default()
        };

        if let Err(e) = scan.validate() {
            log::warn!("Skipping scan {}: {}", scan.stamp_us, e);
            report.skipped = true;
            return report;
        }

        self.transition(FrameState::Sanitizing);
        let cloud = self.sanitizer.sanitize(scan);
        report.points = cloud.len();

        self.transition(FrameState::Detecting);
        let clusters = self.adapter.detect(&cloud);
        report.clusters = clusters.len();

        self.transition(FrameState::Aggregating);
        let people = self.aggregator.aggregate(&clusters);
        report.people = people.len();

        self.transition(FrameState::Publishing);
        report.messages = self.fanout.publish_scan(&cloud);
        report.messages += self.fanout.publish(&people, scan.stamp_us);

        self.transition(FrameState::Idle);
        report
    }

    /// Process scans until `running` clears or the source closes.
    ///
    /// Returns the number of scans processed. Socket failures of the source
    /// are returned as errors.
    pub fn run(&mut self, source: &mut dyn ScanSource, running: &AtomicBool) -> Result<u64> {
        log::info!(
            "Frame driver started (detector '{}')",
            self.adapter.engine_name()
        );
        let mut frames = 0u64;

        while running.load(Ordering::Relaxed) {
            match source.recv_timeout(self.poll_timeout) {
                Ok(Some(scan)) => {
                    let report = self.process_scan(&scan);
                    log::debug!("{:?}", report);
                    frames += 1;
                }
                Ok(None) => continue,
                Err(Error::ChannelClosed(name)) => {
                    log::info!("{} closed, stopping", name);
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        log::info!("Frame driver stopped after {} scans", frames);
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Point2D, PointCloud};
    use crate::detection::{DetectionEngine, DetectorConfig, FeatureSet, LegCluster};
    use crate::io::messages::Envelope;
    use crate::io::sinks::ChannelSink;
    use crate::publication::{FanoutSinks, PublicationConfig};
    use crossbeam_channel::{Receiver, unbounded};
    use std::path::Path;

    /// One leg cluster at the first point of every cloud.
    struct FirstPointEngine;

    impl DetectionEngine for FirstPointEngine {
        fn name(&self) -> &'static str {
            "first-point"
        }

        fn set_feature_set(&mut self, _features: FeatureSet) {}

        fn load_model(&mut self, _path: &Path) -> Result<()> {
            Ok(())
        }

        fn detect_people(&mut self, cloud: &PointCloud) -> Result<Vec<LegCluster>> {
            Ok(cloud
                .iter()
                .take(1)
                .map(|p| LegCluster::from_points(vec![Point2D::new(p.x, p.y)]))
                .collect())
        }
    }

    fn driver() -> (FrameDriver, Vec<Receiver<Envelope>>) {
        let mut outputs = Vec::new();
        let mut sink = |topic: &str| {
            let (tx, rx) = unbounded();
            outputs.push(rx);
            Box::new(ChannelSink::new(topic, tx))
        };
        let sinks = FanoutSinks {
            marker: sink("m"),
            text: sink("t"),
            people: sink("p"),
            measurements: sink("pm"),
            scan_markers: None,
        };
        let adapter =
            DetectionAdapter::with_engine(Box::new(FirstPointEngine), DetectorConfig::default())
                .unwrap();
        let driver = FrameDriver::new(
            ScanSanitizer::new(7),
            adapter,
            PersonAggregator::new(),
            PublicationFanout::new(sinks, &PublicationConfig::default()),
        );
        (driver, outputs)
    }

    #[test]
    fn test_process_scan_report() {
        let (mut driver, outputs) = driver();
        let scan = ScanEvent::new(99, 0.0, 0.1, 0.1, 10.0, vec![2.0, 2.0, 2.0]);

        let report = driver.process_scan(&scan);

        assert_eq!(
            report,
            FrameReport {
                stamp_us: 99,
                skipped: false,
                points: 3,
                clusters: 1,
                people: 1,
                messages: 4,
            }
        );
        assert_eq!(driver.state(), FrameState::Idle);
        assert!(outputs.iter().all(|rx| rx.len() == 1));
    }

    #[test]
    fn test_invalid_scan_skipped() {
        let (mut driver, outputs) = driver();
        let scan = ScanEvent::new(5, 0.0, 0.1, 5.0, 1.0, vec![2.0]);

        let report = driver.process_scan(&scan);

        assert!(report.skipped);
        assert_eq!(report.messages, 0);
        assert_eq!(driver.fanout().marker_ids().peek(), 0);
        assert!(outputs.iter().all(|rx| rx.is_empty()));
    }

    #[test]
    fn test_negative_range_min_processed() {
        let (mut driver, outputs) = driver();
        let scan = ScanEvent::new(6, 0.0, 0.1, -0.1, 10.0, vec![2.0, f32::NAN, -1.0]);

        let report = driver.process_scan(&scan);

        assert!(!report.skipped);
        assert_eq!(report.points, 3);
        assert_eq!(report.messages, 4);
        assert!(outputs.iter().all(|rx| rx.len() == 1));
    }

    #[test]
    fn test_run_stops_when_source_closes() {
        let (driver, _outputs) = driver();
        let mut driver = driver.with_poll_timeout(Duration::from_millis(5));
        let (tx, rx) = unbounded();
        let mut source = crate::io::source::ChannelScanSource::new(rx);
        tx.send(ScanEvent::new(1, 0.0, 0.1, 0.1, 10.0, vec![1.0])).unwrap();
        tx.send(ScanEvent::new(2, 0.0, 0.1, 0.1, 10.0, vec![1.0])).unwrap();
        drop(tx);

        let running = AtomicBool::new(true);
        let frames = driver.run(&mut source, &running).unwrap();

        assert_eq!(frames, 2);
    }

    #[test]
    fn test_run_respects_shutdown_flag() {
        let (mut driver, _outputs) = driver();
        let (_tx, rx) = unbounded::<ScanEvent>();
        let mut source = crate::io::source::ChannelScanSource::new(rx);

        let running = AtomicBool::new(false);
        assert_eq!(driver.run(&mut source, &running).unwrap(), 0);
    }
}
