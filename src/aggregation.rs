//! Person aggregation: leg clusters to person estimates.
//!
//! Each cluster becomes exactly one [`PersonEstimate`] positioned at the
//! cluster's center of gravity. Input order is kept and doubles as the
//! per-frame person id. No merging, no deduplication.

use crate::core::types::PersonEstimate;
use crate::detection::LegCluster;
use crate::utils::constants::DEFAULT_RELIABILITY;

/// Reduces leg clusters to person estimates.
#[derive(Debug, Clone)]
pub struct PersonAggregator {
    reliability: f32,
}

impl PersonAggregator {
    /// Create an aggregator using [`DEFAULT_RELIABILITY`].
    pub fn new() -> Self {
        Self {
            reliability: DEFAULT_RELIABILITY,
        }
    }

    /// Reliability attached to every estimate.
    pub fn reliability(&self) -> f32 {
        self.reliability
    }

    /// One estimate per cluster, in input order.
    pub fn aggregate(&self, clusters: &[LegCluster]) -> Vec<PersonEstimate> {
        clusters
            .iter()
            .enumerate()
            .map(|(id, cluster)| PersonEstimate {
                id,
                position: cluster.center_of_gravity(),
                reliability: self.reliability,
            })
            .collect()
    }
}

impl Default for PersonAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Point2D;
    use approx::assert_relative_eq;

    fn cluster_at(x: f32, y: f32) -> LegCluster {
        LegCluster::from_points(vec![
            Point2D::new(x - 0.1, y),
            Point2D::new(x + 0.1, y),
        ])
    }

    #[test]
    fn test_one_estimate_per_cluster_in_order() {
        let clusters = vec![cluster_at(1.0, 0.5), cluster_at(-0.3, 2.0), cluster_at(1.0, 0.5)];

        let people = PersonAggregator::new().aggregate(&clusters);

        assert_eq!(people.len(), 3);
        for (i, person) in people.iter().enumerate() {
            assert_eq!(person.id, i);
            assert_eq!(person.reliability, 1.0);
        }
        assert_relative_eq!(people[1].position.x, -0.3, epsilon = 1e-6);
        assert_relative_eq!(people[1].position.y, 2.0, epsilon = 1e-6);
        // Overlapping clusters are not merged
        assert_eq!(people[0].position, people[2].position);
    }

    #[test]
    fn test_empty_input() {
        assert!(PersonAggregator::default().aggregate(&[]).is_empty());
    }

    #[test]
    fn test_repeatable() {
        let clusters = vec![cluster_at(0.4, 1.2), cluster_at(2.0, -1.0)];
        let aggregator = PersonAggregator::new();
        assert_eq!(aggregator.aggregate(&clusters), aggregator.aggregate(&clusters));
    }
}
