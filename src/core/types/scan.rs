//! Laser scan event type.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One frame of laser range-finder readings in polar coordinates.
///
/// Readings are evenly spaced: reading `i` was taken at
/// `angle_min + i * angle_increment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEvent {
    /// Acquisition timestamp in microseconds since epoch
    pub stamp_us: u64,
    /// Identifier of the sensor frame that produced the scan
    pub frame_id: String,
    /// Angle of the first reading in radians
    pub angle_min: f32,
    /// Angular step between consecutive readings in radians
    pub angle_increment: f32,
    /// Minimum valid range in meters
    pub range_min: f32,
    /// Maximum valid range in meters
    pub range_max: f32,
    /// Range readings in meters (NaN or inf mark sensor errors)
    #[serde(with = "range_readings")]
    pub ranges: Vec<f32>,
}

/// Wire encoding of range readings.
///
/// Binary formats carry the `f32` values unchanged. JSON has no non-finite
/// numbers, so human-readable formats write NaN as `null` and infinities as
/// `"inf"` / `"-inf"`. A `null` reading decodes as NaN.
mod range_readings {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    #[serde(untagged)]
    enum Written {
        Value(f32),
        Symbol(&'static str),
        Missing,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Read {
        Value(f32),
        Symbol(String),
    }

    pub fn serialize<S>(ranges: &[f32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !serializer.is_human_readable() {
            return ranges.serialize(serializer);
        }
        serializer.collect_seq(ranges.iter().map(|&r| {
            if r.is_finite() {
                Written::Value(r)
            } else if r.is_nan() {
                Written::Missing
            } else if r > 0.0 {
                Written::Symbol("inf")
            } else {
                Written::Symbol("-inf")
            }
        }))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<f32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        if !deserializer.is_human_readable() {
            return Vec::<f32>::deserialize(deserializer);
        }
        Vec::<Option<Read>>::deserialize(deserializer)?
            .into_iter()
            .map(|reading| match reading {
                None => Ok(f32::NAN),
                Some(Read::Value(r)) => Ok(r),
                Some(Read::Symbol(s)) => match s.as_str() {
                    "inf" => Ok(f32::INFINITY),
                    "-inf" => Ok(f32::NEG_INFINITY),
                    "nan" => Ok(f32::NAN),
                    other => Err(D::Error::custom(format!(
                        "invalid range reading '{}'",
                        other
                    ))),
                },
            })
            .collect()
    }
}

impl ScanEvent {
    /// Create a new scan event with an empty frame id.
    pub fn new(
        stamp_us: u64,
        angle_min: f32,
        angle_increment: f32,
        range_min: f32,
        range_max: f32,
        ranges: Vec<f32>,
    ) -> Self {
        Self {
            stamp_us,
            frame_id: String::new(),
            angle_min,
            angle_increment,
            range_min,
            range_max,
            ranges,
        }
    }

    /// Set the source frame id.
    pub fn with_frame_id(mut self, frame_id: impl Into<String>) -> Self {
        self.frame_id = frame_id.into();
        self
    }

    /// Number of range readings.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if scan has no readings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Angle of reading `index` in radians.
    #[inline]
    pub fn angle_at(&self, index: usize) -> f32 {
        self.angle_min + index as f32 * self.angle_increment
    }

    /// Validate the scan's declared geometry.
    ///
    /// Range readings themselves are never rejected here; invalid readings
    /// are repaired by the sanitizer. A negative `range_min` is accepted and
    /// treated as zero when sanitizing.
    pub fn validate(&self) -> Result<()> {
        if !self.range_min.is_finite() || !self.range_max.is_finite() {
            return Err(Error::InvalidScan(format!(
                "range limits must be finite (min={}, max={})",
                self.range_min, self.range_max
            )));
        }
        if self.range_min > self.range_max {
            return Err(Error::InvalidScan(format!(
                "range_min {} exceeds range_max {}",
                self.range_min, self.range_max
            )));
        }
        if !self.angle_min.is_finite() || !self.angle_increment.is_finite() {
            return Err(Error::InvalidScan("angles must be finite".to_string()));
        }
        Ok(())
    }
}
