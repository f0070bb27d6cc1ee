//! Measurement policy constants for the leg detector.
//!
//! Policy values, not derived quantities.
//!
//! # Measurement Covariance
//!
//! Position measurements handed to the downstream people tracker carry a
//! diagonal 3x3 covariance (x, y, z):
//!
//! ```text
//! ┌                                              ┐
//! │ (σ/r)²   0        0                          │
//! │ 0        (σ/r)²   0                          │
//! │ 0        0        UNCONSTRAINED_HEIGHT_VAR   │
//! └                                              ┘
//! σ = POSITION_STDDEV, r = reliability
//! ```

/// Height of the laser scan plane above the floor in meters.
/// Every position measurement is projected onto this plane.
pub const SENSOR_MOUNTING_HEIGHT: f32 = 0.16;

/// Horizontal position standard deviation in meters at reliability 1.0.
pub const POSITION_STDDEV: f32 = 0.3;

/// Vertical variance signalling that height is not observed by a 2D scanner.
pub const UNCONSTRAINED_HEIGHT_VARIANCE: f32 = 10000.0;

/// Reliability assigned to every person estimate.
/// Reserved for a confidence model; must stay strictly positive.
pub const DEFAULT_RELIABILITY: f32 = 1.0;

/// Upper bound of the jitter subtracted from `range_max` when a reading is
/// replaced (meters).
pub const INVALID_RANGE_JITTER: f32 = 0.10;

/// Point label for readings that passed sanitization.
pub const LABEL_VALID: i32 = 1;

/// Logical source name stamped on position measurements.
pub const DEFAULT_SOURCE_NAME: &str = "leg_detector";

/// Reference frame of the laser.
pub const DEFAULT_FRAME_ID: &str = "hokuyo_link";
