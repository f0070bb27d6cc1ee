//! Scan sanitization and polar to Cartesian conversion.
//!
//! Converts a [`ScanEvent`] (polar) into a [`PointCloud`] (Cartesian) without
//! dropping any reading. Out-of-range readings are clamped to the scan's
//! declared limits; readings that are still not finite (NaN error markers)
//! are replaced by a range just inside `range_max`:
//!
//! ```text
//! r' = clamp(r, max(range_min, 0), range_max)
//! r' = range_max - U,  U ∈ (0, 0.10]     if r' is not finite
//! x  = r' * cos(angle_min + i * angle_increment)
//! y  = r' * sin(angle_min + i * angle_increment)
//! ```
//!
//! The random jitter keeps replaced readings from collapsing onto one
//! duplicated point, which would otherwise look like a dense segment to the
//! detection engine.

use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::core::types::{Point2D, PointCloud, ScanEvent};
use crate::utils::constants::INVALID_RANGE_JITTER;

/// Scan sanitizer owning the jitter random source.
pub struct ScanSanitizer<R: Rng = SmallRng> {
    rng: R,
}

impl ScanSanitizer<SmallRng> {
    /// Create a sanitizer with a seeded random source.
    ///
    /// If seed is 0, uses random entropy for non-deterministic behavior.
    /// Otherwise, uses the provided seed for reproducible results.
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { rng }
    }
}

impl Default for ScanSanitizer<SmallRng> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<R: Rng> ScanSanitizer<R> {
    /// Create a sanitizer around an existing random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Effective range for one raw reading.
    ///
    /// Always finite and within `[range_min, range_max]` for a scan that
    /// passed [`ScanEvent::validate`].
    pub fn effective_range(&mut self, raw: f32, range_min: f32, range_max: f32) -> f32 {
        // Comparisons are false for NaN, so NaN survives the clamp.
        let clamped = if raw > range_max {
            range_max
        } else if raw < range_min {
            range_min
        } else {
            raw
        };

        if clamped.is_finite() {
            return clamped;
        }

        let jitter = INVALID_RANGE_JITTER - self.rng.gen_range(0.0..INVALID_RANGE_JITTER);
        let mut replaced = range_max - jitter;
        if replaced >= range_max {
            // Jitter below f32 resolution at this range
            replaced = range_max - f32::EPSILON * range_max.max(1.0);
        }
        replaced.max(range_min)
    }

    /// Convert a scan to a point cloud with one point per reading.
    pub fn sanitize(&mut self, scan: &ScanEvent) -> PointCloud {
        let mut cloud = PointCloud::with_capacity(scan.len(), scan.stamp_us);
        // A negative range would mirror the point through the sensor origin.
        let range_min = scan.range_min.max(0.0);

        for (i, &raw) in scan.ranges.iter().enumerate() {
            let range = self.effective_range(raw, range_min, scan.range_max);
            cloud.push(Point2D::from_polar(range, scan.angle_at(i)));
        }

        cloud
    }
}
