//! Core data types for the detection pipeline.
//!
//! - [`ScanEvent`]: Inbound laser scan in polar coordinates
//! - [`Point2D`], [`Point3D`], [`PointCloud`]: Cartesian geometry
//! - [`PersonEstimate`], [`PositionMeasurement`], [`Covariance3D`]: Detection output

mod person;
mod point;
mod scan;

pub use person::{Covariance3D, PersonEstimate, PositionMeasurement};
pub use point::{Point2D, Point3D, PointCloud};
pub use scan::ScanEvent;
