//! I/O: wire format, inbound scan sources and outbound message sinks.

pub mod messages;
pub mod sinks;
pub mod source;
pub mod udp_receiver;
pub mod wire;

pub use messages::{
    ColorRgba, Envelope, Header, Marker, MarkerAction, MarkerKind, Message, People, Person, Pose,
    Quaternion, TextMessage, TrackerMeasurement, TrackerMeasurementArray, Vector3,
};
pub use sinks::{ChannelSink, MessageSink, UdpSink};
pub use source::{ChannelScanSource, ScanSource};
pub use udp_receiver::UdpScanReceiver;
pub use wire::{Serializer, WireFormat};
