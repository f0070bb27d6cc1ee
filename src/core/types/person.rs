//! Person estimate and tracker measurement types.

use serde::{Deserialize, Serialize};

use super::point::Point3D;
use crate::utils::constants::{
    POSITION_STDDEV, SENSOR_MOUNTING_HEIGHT, UNCONSTRAINED_HEIGHT_VARIANCE,
};

/// One detected person in the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonEstimate {
    /// Index within the current frame (not stable across frames)
    pub id: usize,
    /// Center of gravity of the leg cluster in the sensor frame
    pub position: Point3D,
    /// Measurement reliability, strictly positive
    pub reliability: f32,
}

/// 3x3 covariance matrix for a 3D position (x, y, z).
///
/// Stored as row-major array: [xx, xy, xz, yx, yy, yz, zx, zy, zz].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Covariance3D {
    /// Row-major 3x3 matrix data
    data: [f32; 9],
}

impl Covariance3D {
    /// Create a diagonal covariance matrix from variances.
    #[inline]
    pub fn diagonal(xx: f32, yy: f32, zz: f32) -> Self {
        Self {
            data: [xx, 0.0, 0.0, 0.0, yy, 0.0, 0.0, 0.0, zz],
        }
    }

    /// Covariance of a planar detection with the given reliability.
    ///
    /// Horizontal variance is `(POSITION_STDDEV / reliability)²`; height is
    /// marked unconstrained.
    #[inline]
    pub fn for_reliability(reliability: f32) -> Self {
        let horizontal = (POSITION_STDDEV / reliability).powi(2);
        Self::diagonal(horizontal, horizontal, UNCONSTRAINED_HEIGHT_VARIANCE)
    }

    /// Element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is greater than 2.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < 3 && col < 3, "covariance index ({}, {}) out of bounds", row, col);
        self.data[row * 3 + col]
    }

    /// Diagonal entries (xx, yy, zz).
    #[inline]
    pub fn diagonal_entries(&self) -> [f32; 3] {
        [self.data[0], self.data[4], self.data[8]]
    }

    /// Get raw data as slice.
    #[inline]
    pub fn as_array(&self) -> &[f32; 9] {
        &self.data
    }
}

/// Person position prepared for a downstream probabilistic tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionMeasurement {
    /// Position projected onto the scan plane height
    pub position: Point3D,
    /// Reliability copied from the estimate
    pub reliability: f32,
    /// Position uncertainty
    pub covariance: Covariance3D,
}

impl PositionMeasurement {
    /// Project an estimate onto the sensor mounting height.
    pub fn from_estimate(estimate: &PersonEstimate) -> Self {
        Self {
            position: estimate.position.with_z(SENSOR_MOUNTING_HEIGHT),
            reliability: estimate.reliability,
            covariance: Covariance3D::for_reliability(estimate.reliability),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn estimate(x: f32, y: f32, reliability: f32) -> PersonEstimate {
        PersonEstimate {
            id: 0,
            position: Point3D::new(x, y, 0.0),
            reliability,
        }
    }

    #[test]
    fn test_covariance_at_unit_reliability() {
        let cov = Covariance3D::for_reliability(1.0);
        assert_relative_eq!(cov.get(0, 0), 0.09, epsilon = 1e-6);
        assert_relative_eq!(cov.get(1, 1), 0.09, epsilon = 1e-6);
        assert_eq!(cov.get(2, 2), 10000.0);
        assert_eq!(cov.get(0, 1), 0.0);
        assert_eq!(cov.get(2, 0), 0.0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_covariance_get_out_of_bounds() {
        Covariance3D::diagonal(1.0, 1.0, 1.0).get(0, 3);
    }

    #[test]
    fn test_covariance_scales_inversely_with_reliability() {
        let cov = Covariance3D::for_reliability(0.5);
        assert_relative_eq!(cov.get(0, 0), 0.36, epsilon = 1e-6);
        assert!(cov.diagonal_entries().iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_measurement_projects_to_mounting_height() {
        let m = PositionMeasurement::from_estimate(&estimate(1.0, 0.5, 1.0));
        assert_eq!(m.position.x, 1.0);
        assert_eq!(m.position.y, 0.5);
        assert_relative_eq!(m.position.z, 0.16);
        assert_eq!(m.reliability, 1.0);
    }
}
