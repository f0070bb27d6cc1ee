//! Jump-distance segmentation and per-segment geometric features.

use crate::core::types::Point2D;

/// Split an ordered point sequence into contiguous segments.
///
/// A new segment starts wherever the gap between consecutive points exceeds
/// `max_gap`. Returns `(start, end)` index pairs (end exclusive) covering
/// every point exactly once.
pub fn split_by_jump_distance(points: &[Point2D], max_gap: f32) -> Vec<(usize, usize)> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut seg_start = 0;

    for i in 1..points.len() {
        if points[i].distance(&points[i - 1]) > max_gap {
            segments.push((seg_start, i));
            seg_start = i;
        }
    }
    segments.push((seg_start, points.len()));

    segments
}

/// Geometric features of one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentFeatures {
    /// Number of points
    pub num_points: usize,
    /// Distance between first and last point in meters
    pub width: f32,
    /// RMS perpendicular distance to the endpoint chord in meters
    pub linearity: f32,
    /// Mean distance between consecutive points in meters
    pub mean_spacing: f32,
    /// Segment centroid
    pub centroid: Point2D,
}

impl SegmentFeatures {
    /// Compute features of a non-empty segment.
    pub fn compute(points: &[Point2D]) -> Option<Self> {
        let first = points.first()?;
        let last = points.last()?;
        let n = points.len();

        let width = first.distance(last);

        let (sx, sy) = points
            .iter()
            .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x, sy + p.y));
        let centroid = Point2D::new(sx / n as f32, sy / n as f32);

        let mean_spacing = if n > 1 {
            points.windows(2).map(|w| w[0].distance(&w[1])).sum::<f32>() / (n - 1) as f32
        } else {
            0.0
        };

        let linearity = if width > f32::EPSILON {
            // Perpendicular distance via cross product with the chord
            let dx = (last.x - first.x) / width;
            let dy = (last.y - first.y) / width;
            let sum_sq: f32 = points
                .iter()
                .map(|p| {
                    let d = (p.x - first.x) * dy - (p.y - first.y) * dx;
                    d * d
                })
                .sum();
            (sum_sq / n as f32).sqrt()
        } else {
            0.0
        };

        Some(Self {
            num_points: n,
            width,
            linearity,
            mean_spacing,
            centroid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line(x0: f32, n: usize, step: f32) -> Vec<Point2D> {
        (0..n)
            .map(|i| Point2D::new(x0 + i as f32 * step, 1.0))
            .collect()
    }

    #[test]
    fn test_split_single_segment() {
        let points = line(0.0, 5, 0.05);
        assert_eq!(split_by_jump_distance(&points, 0.2), vec![(0, 5)]);
    }

    #[test]
    fn test_split_at_jump() {
        let mut points = line(0.0, 3, 0.05);
        points.extend(line(1.0, 4, 0.05));

        let segments = split_by_jump_distance(&points, 0.2);

        assert_eq!(segments, vec![(0, 3), (3, 7)]);
    }

    #[test]
    fn test_split_isolated_points() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(2.0, 0.0),
        ];
        assert_eq!(
            split_by_jump_distance(&points, 0.2),
            vec![(0, 1), (1, 2), (2, 3)]
        );
    }

    #[test]
    fn test_split_empty() {
        assert!(split_by_jump_distance(&[], 0.2).is_empty());
    }

    #[test]
    fn test_features_of_straight_line() {
        let points = line(0.0, 5, 0.05);

        let f = SegmentFeatures::compute(&points).unwrap();

        assert_eq!(f.num_points, 5);
        assert_relative_eq!(f.width, 0.2, epsilon = 1e-6);
        assert_relative_eq!(f.linearity, 0.0, epsilon = 1e-6);
        assert_relative_eq!(f.mean_spacing, 0.05, epsilon = 1e-6);
        assert_relative_eq!(f.centroid.x, 0.1, epsilon = 1e-6);
        assert_relative_eq!(f.centroid.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_features_of_arc_are_not_linear() {
        // Half circle of radius 0.05, like the front of a leg
        let points: Vec<Point2D> = (0..7)
            .map(|i| {
                let a = std::f32::consts::PI * i as f32 / 6.0;
                Point2D::new(0.05 * a.cos(), 1.0 - 0.05 * a.sin())
            })
            .collect();

        let f = SegmentFeatures::compute(&points).unwrap();

        assert_relative_eq!(f.width, 0.1, epsilon = 1e-5);
        assert!(f.linearity > 0.01);
    }

    #[test]
    fn test_features_of_empty_segment() {
        assert!(SegmentFeatures::compute(&[]).is_none());
    }
}
