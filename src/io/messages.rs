//! Outbound message types.
//!
//! Every frame with at least one detected person produces one message on each
//! of four topics: a visualization marker per person, a text summary, the
//! people list, and the position measurements for downstream trackers.
//! Messages travel wrapped in an [`Envelope`] naming their topic.

use serde::{Deserialize, Serialize};

use crate::core::types::Point3D;

// ============================================================================
// Common
// ============================================================================

/// Timestamp and coordinate frame shared by all stamped messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Timestamp in microseconds since epoch
    pub stamp_us: u64,
    /// Coordinate frame of the contained positions
    pub frame_id: String,
}

impl Header {
    pub fn new(stamp_us: u64, frame_id: impl Into<String>) -> Self {
        Self {
            stamp_us,
            frame_id: frame_id.into(),
        }
    }
}

/// Unit quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };
}

/// Position and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3D,
    pub orientation: Quaternion,
}

/// Per-axis extent in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// RGBA color, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

// ============================================================================
// Visualization
// ============================================================================

/// Marker primitive shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    Cylinder,
}

/// What a viewer should do with a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerAction {
    /// Add or replace the marker with the same namespace and id
    Add,
}

/// Visualization marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub header: Header,
    /// Namespace; together with `id` identifies the marker in a viewer
    pub ns: String,
    pub id: u64,
    pub kind: MarkerKind,
    pub action: MarkerAction,
    pub pose: Pose,
    pub scale: Vector3,
    pub color: ColorRgba,
    /// How long a viewer keeps the marker without a refresh
    pub lifetime_ms: u64,
}

/// Free-form text message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMessage {
    pub data: String,
}

// ============================================================================
// People
// ============================================================================

/// One named person position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub position: Point3D,
}

/// Stamped list of people detected in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct People {
    pub header: Header,
    pub people: Vec<Person>,
}

/// Single position measurement for a people tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerMeasurement {
    pub header: Header,
    /// Name of the producing detector
    pub name: String,
    /// Tracker object id; empty for fresh detections
    pub object_id: String,
    pub pos: Point3D,
    pub reliability: f32,
    /// Row-major 3x3 position covariance
    pub covariance: [f32; 9],
    /// Non-zero asks the tracker to start a new track if unmatched
    pub initialization: u8,
}

/// Stamped batch of tracker measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerMeasurementArray {
    pub header: Header,
    pub people: Vec<TrackerMeasurement>,
}

// ============================================================================
// Envelope
// ============================================================================

/// Any outbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    Marker(Marker),
    Text(TextMessage),
    People(People),
    Measurements(TrackerMeasurementArray),
}

impl Message {
    /// Short kind name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Marker(_) => "marker",
            Message::Text(_) => "text",
            Message::People(_) => "people",
            Message::Measurements(_) => "measurements",
        }
    }
}

/// A message tagged with the topic it is published on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub topic: String,
    pub message: Message,
}

impl Envelope {
    pub fn new(topic: impl Into<String>, message: Message) -> Self {
        Self {
            topic: topic.into(),
            message,
        }
    }
}
