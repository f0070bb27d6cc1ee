//! Publication fan-out.
//!
//! Routes one frame's person estimates to four independent topics:
//!
//! | Topic        | Message                     | Stamp        |
//! |--------------|-----------------------------|--------------|
//! | marker       | one cylinder per person     | publish time |
//! | text         | `"<x> <y>"` of person 0     | -            |
//! | people       | `"id: <i>"` + position      | publish time |
//! | measurements | position + covariance       | scan time    |
//!
//! A frame without people publishes nothing. Sink failures are logged and
//! never stop the remaining sinks.

mod markers;

pub use markers::{
    MARKER_LIFETIME_MS, MarkerIdCounter, PERSON_NAMESPACE, SCAN_NAMESPACE, person_marker,
    scan_markers,
};

use serde::{Deserialize, Serialize};

use crate::core::types::{PersonEstimate, PointCloud, PositionMeasurement};
use crate::io::messages::{
    Header, Message, People, Person, TextMessage, TrackerMeasurement, TrackerMeasurementArray,
};
use crate::io::sinks::MessageSink;
use crate::io::wire::WireFormat;
use crate::utils::constants::{DEFAULT_FRAME_ID, DEFAULT_SOURCE_NAME};
use crate::utils::now_us;

/// Publication settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationConfig {
    /// UDP destination for all topics
    pub target_address: String,
    /// Outbound wire format
    pub wire_format: WireFormat,
    /// Coordinate frame stamped on every message
    pub frame_id: String,
    /// Detector name carried by tracker measurements
    pub source_name: String,
    /// Publish scan debug markers
    pub visualize_scan: bool,
    /// Mark every n-th scan point
    pub scan_marker_stride: usize,
}

impl Default for PublicationConfig {
    fn default() -> Self {
        Self {
            target_address: "127.0.0.1:5561".to_string(),
            wire_format: WireFormat::Json,
            frame_id: DEFAULT_FRAME_ID.to_string(),
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            visualize_scan: false,
            scan_marker_stride: 10,
        }
    }
}

/// One sink per output topic.
pub struct FanoutSinks {
    pub marker: Box<dyn MessageSink>,
    pub text: Box<dyn MessageSink>,
    pub people: Box<dyn MessageSink>,
    pub measurements: Box<dyn MessageSink>,
    /// Scan debug markers; kept apart from the four person topics
    pub scan_markers: Option<Box<dyn MessageSink>>,
}

/// Publishes person estimates to all topics.
pub struct PublicationFanout {
    sinks: FanoutSinks,
    marker_ids: MarkerIdCounter,
    frame_id: String,
    source_name: String,
    scan_marker_stride: usize,
}

impl PublicationFanout {
    /// Create a fan-out. Scan markers are only published when `config`
    /// enables them and a scan sink is present.
    pub fn new(mut sinks: FanoutSinks, config: &PublicationConfig) -> Self {
        if !config.visualize_scan {
            sinks.scan_markers = None;
        }
        Self {
            sinks,
            marker_ids: MarkerIdCounter::new(),
            frame_id: config.frame_id.clone(),
            source_name: config.source_name.clone(),
            scan_marker_stride: config.scan_marker_stride,
        }
    }

    /// Marker id counter (exposed for inspection).
    pub fn marker_ids(&self) -> &MarkerIdCounter {
        &self.marker_ids
    }

    /// Publish one frame's estimates.
    ///
    /// Returns the number of messages handed to sinks successfully. Nothing
    /// is published for an empty slice.
    pub fn publish(&mut self, people: &[PersonEstimate], scan_stamp_us: u64) -> usize {
        let Some(first) = people.first() else {
            return 0;
        };

        let publish_stamp = now_us();
        let mut sent = 0;

        for person in people {
            log::info!(
                "person {} at {:.2}(x) {:.2}(y)",
                person.id,
                person.position.x,
                person.position.y
            );
            let marker = person_marker(
                self.header(publish_stamp),
                self.marker_ids.allocate(),
                &person.position,
            );
            sent += deliver(self.sinks.marker.as_mut(), Message::Marker(marker));
        }

        let people_msg = People {
            header: self.header(publish_stamp),
            people: people
                .iter()
                .map(|p| Person {
                    name: format!("id: {}", p.id),
                    position: p.position,
                })
                .collect(),
        };
        sent += deliver(self.sinks.people.as_mut(), Message::People(people_msg));

        let measurements = TrackerMeasurementArray {
            header: self.header(scan_stamp_us),
            people: people
                .iter()
                .map(|p| self.measurement(p, scan_stamp_us))
                .collect(),
        };
        sent += deliver(
            self.sinks.measurements.as_mut(),
            Message::Measurements(measurements),
        );
        log::info!("--");

        let text = TextMessage {
            data: format!("{} {}", first.position.x, first.position.y),
        };
        sent += deliver(self.sinks.text.as_mut(), Message::Text(text));

        sent
    }

    /// Publish scan debug markers, if enabled.
    pub fn publish_scan(&mut self, cloud: &PointCloud) -> usize {
        let Some(sink) = self.sinks.scan_markers.as_mut() else {
            return 0;
        };

        let header = Header::new(now_us(), self.frame_id.clone());
        scan_markers(&header, cloud, self.scan_marker_stride)
            .into_iter()
            .map(|marker| deliver(sink.as_mut(), Message::Marker(marker)))
            .sum()
    }

    fn header(&self, stamp_us: u64) -> Header {
        Header::new(stamp_us, self.frame_id.clone())
    }

    fn measurement(&self, person: &PersonEstimate, scan_stamp_us: u64) -> TrackerMeasurement {
        let m = PositionMeasurement::from_estimate(person);
        TrackerMeasurement {
            header: self.header(scan_stamp_us),
            name: self.source_name.clone(),
            object_id: String::new(),
            pos: m.position,
            reliability: m.reliability,
            covariance: *m.covariance.as_array(),
            initialization: 1,
        }
    }
}

/// Send to one sink; failures are logged and counted as zero.
fn deliver(sink: &mut dyn MessageSink, message: Message) -> usize {
    let kind = message.kind();
    match sink.send(message) {
        Ok(()) => 1,
        Err(e) => {
            log::warn!("Failed to publish {} on '{}': {}", kind, sink.topic(), e);
            0
        }
    }
}
