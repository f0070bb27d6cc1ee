//! Sensor processing layer.
//!
//! Turns raw laser scans into point clouds for the detection engine:
//!
//! ```text
//! ScanEvent → ScanSanitizer (clamp, repair, polar→Cartesian) → PointCloud
//! ```

mod sanitizer;

pub use sanitizer::ScanSanitizer;
