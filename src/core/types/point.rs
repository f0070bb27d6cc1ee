//! Point and point cloud types.

use serde::{Deserialize, Serialize};

use crate::utils::constants::LABEL_VALID;

/// A labelled 2D point in the sensor frame, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
    /// Per-point class label (currently always [`LABEL_VALID`])
    pub label: i32,
}

impl Point2D {
    /// Create a new point labelled valid.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            label: LABEL_VALID,
        }
    }

    /// Create a point from polar coordinates.
    #[inline]
    pub fn from_polar(range: f32, angle: f32) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self::new(range * cos_a, range * sin_a)
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Distance from the sensor origin.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Bearing from the sensor origin in radians.
    #[inline]
    pub fn bearing(&self) -> f32 {
        self.y.atan2(self.x)
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A 3D point in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same point with a different z.
    #[inline]
    pub fn with_z(self, z: f32) -> Self {
        Self { z, ..self }
    }
}

/// Cartesian point cloud built from one scan.
///
/// Created fresh for every scan and dropped when the frame completes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointCloud {
    /// Points in scan order
    pub points: Vec<Point2D>,
    /// Timestamp of the source scan in microseconds
    pub stamp_us: u64,
}

impl PointCloud {
    /// Create an empty cloud with pre-allocated capacity.
    pub fn with_capacity(capacity: usize, stamp_us: u64) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            stamp_us,
        }
    }

    /// Append a point.
    #[inline]
    pub fn push(&mut self, point: Point2D) {
        self.points.push(point);
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over points.
    pub fn iter(&self) -> impl Iterator<Item = &Point2D> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_from_polar() {
        let p = Point2D::from_polar(2.0, FRAC_PI_2);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-6);
        assert_eq!(p.label, LABEL_VALID);
    }

    #[test]
    fn test_polar_roundtrip() {
        for &(r, theta) in &[(1.0f32, 0.3f32), (7.5, -2.0), (0.2, 3.0)] {
            let p = Point2D::from_polar(r, theta);
            assert_relative_eq!(p.norm(), r, epsilon = 1e-5);
            assert_relative_eq!(p.bearing(), theta, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
    }
}
