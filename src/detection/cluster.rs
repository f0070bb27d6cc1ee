//! Leg cluster produced by a detection engine.

use crate::core::types::{Point2D, Point3D};

/// Group of scan points an engine attributes to one person's legs.
///
/// The point set is owned by the cluster; consumers only need its center.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegCluster {
    points: Vec<Point2D>,
}

impl LegCluster {
    /// Create a cluster from its member points.
    pub fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    /// Member points.
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Number of member points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if cluster has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Unweighted centroid of the member points, with z = 0.
    ///
    /// An empty cluster has its center at the origin.
    pub fn center_of_gravity(&self) -> Point3D {
        if self.points.is_empty() {
            return Point3D::default();
        }

        let n = self.points.len() as f32;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x, sy + p.y));

        Point3D::new(sx / n, sy / n, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_of_gravity() {
        let cluster = LegCluster::from_points(vec![
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 1.0),
            Point2D::new(3.0, 4.0),
        ]);

        let cog = cluster.center_of_gravity();

        assert_relative_eq!(cog.x, 2.0);
        assert_relative_eq!(cog.y, 2.0);
        assert_eq!(cog.z, 0.0);
    }

    #[test]
    fn test_empty_cluster_center() {
        let cluster = LegCluster::default();
        assert!(cluster.is_empty());
        assert_eq!(cluster.center_of_gravity(), Point3D::default());
    }
}
