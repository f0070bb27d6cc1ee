//! Visualization marker builders.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::types::{Point3D, PointCloud};
use crate::io::messages::{
    ColorRgba, Header, Marker, MarkerAction, MarkerKind, Pose, Quaternion, Vector3,
};

/// Namespace of person markers.
pub const PERSON_NAMESPACE: &str = "person";

/// Namespace of scan debug markers.
pub const SCAN_NAMESPACE: &str = "laserdot";

/// Viewer keeps a marker this long without a refresh.
pub const MARKER_LIFETIME_MS: u64 = 1000;

/// Person marker extent: 0.4 m diameter, 1.5 m tall.
const PERSON_SCALE: Vector3 = Vector3 {
    x: 0.4,
    y: 0.4,
    z: 1.5,
};

const SCAN_DOT_SCALE: Vector3 = Vector3 {
    x: 0.04,
    y: 0.04,
    z: 0.15,
};

/// Semi-transparent green.
const MARKER_COLOR: ColorRgba = ColorRgba {
    r: 0.0,
    g: 1.0,
    b: 0.0,
    a: 0.5,
};

/// Process-lifetime source of person marker ids.
///
/// Starts at 0 and only ever counts up, so a viewer never confuses a marker
/// with one from an earlier frame.
#[derive(Debug, Default)]
pub struct MarkerIdCounter {
    next: AtomicU64,
}

impl MarkerIdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next unused id.
    pub fn allocate(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Id the next call to [`allocate`](Self::allocate) will return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

fn cylinder(header: Header, ns: &str, id: u64, x: f32, y: f32, scale: Vector3) -> Marker {
    Marker {
        header,
        ns: ns.to_string(),
        id,
        kind: MarkerKind::Cylinder,
        action: MarkerAction::Add,
        pose: Pose {
            position: Point3D::new(x, y, 0.0),
            orientation: Quaternion::IDENTITY,
        },
        scale,
        color: MARKER_COLOR,
        lifetime_ms: MARKER_LIFETIME_MS,
    }
}

/// Cylinder marker standing on the floor at a person's position.
pub fn person_marker(header: Header, id: u64, position: &Point3D) -> Marker {
    cylinder(header, PERSON_NAMESPACE, id, position.x, position.y, PERSON_SCALE)
}

/// Small cylinders on every `stride`-th scan point, id = point index.
pub fn scan_markers(header: &Header, cloud: &PointCloud, stride: usize) -> Vec<Marker> {
    cloud
        .iter()
        .enumerate()
        .step_by(stride.max(1))
        .map(|(i, p)| cylinder(header.clone(), SCAN_NAMESPACE, i as u64, p.x, p.y, SCAN_DOT_SCALE))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Point2D;

    #[test]
    fn test_counter_monotonic() {
        let counter = MarkerIdCounter::new();
        assert_eq!(counter.allocate(), 0);
        assert_eq!(counter.allocate(), 1);
        assert_eq!(counter.peek(), 2);
    }

    #[test]
    fn test_person_marker_shape() {
        let marker = person_marker(Header::new(5, "hokuyo_link"), 3, &Point3D::new(1.0, -2.0, 0.7));

        assert_eq!(marker.ns, "person");
        assert_eq!(marker.id, 3);
        assert_eq!(marker.kind, MarkerKind::Cylinder);
        assert_eq!(marker.action, MarkerAction::Add);
        assert_eq!(marker.pose.position, Point3D::new(1.0, -2.0, 0.0));
        assert_eq!(marker.pose.orientation, Quaternion::IDENTITY);
        assert_eq!(marker.scale, Vector3::new(0.4, 0.4, 1.5));
        assert_eq!(marker.color, ColorRgba::new(0.0, 1.0, 0.0, 0.5));
        assert_eq!(marker.lifetime_ms, 1000);
    }

    #[test]
    fn test_scan_markers_stride() {
        let mut cloud = PointCloud::with_capacity(25, 0);
        for i in 0..25 {
            cloud.push(Point2D::new(i as f32, 0.0));
        }

        let markers = scan_markers(&Header::new(0, "laser"), &cloud, 10);

        let ids: Vec<u64> = markers.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 10, 20]);
        assert_eq!(markers[1].pose.position.x, 10.0);
        assert_eq!(markers[0].ns, "laserdot");
        assert_eq!(markers[0].scale, Vector3::new(0.04, 0.04, 0.15));
    }

    #[test]
    fn test_scan_markers_zero_stride() {
        let mut cloud = PointCloud::with_capacity(2, 0);
        cloud.push(Point2D::new(0.0, 0.0));
        cloud.push(Point2D::new(1.0, 0.0));
        assert_eq!(scan_markers(&Header::new(0, "l"), &cloud, 0).len(), 2);
    }
}
