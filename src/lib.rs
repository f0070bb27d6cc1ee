//! pada-detect - Leg-based person detection for 2D laser range-finder scans
//!
//! # Architecture
//!
//! The crate is organized into layers, each depending only on those below:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 main / driver                       │  ← Orchestration
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Infrastructure
//! │        (wire, messages, sinks, scan sources)        │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │           aggregation / publication/                │  ← Output
//! │       (person estimates, four-topic fan-out)        │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                  detection/                         │  ← Detection
//! │      (engine capability, adapter, geometric)        │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   sensors/                          │  ← Sensor processing
//! │          (range sanitizing, polar → xy)             │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │        (scan, points, person, covariance)           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Frame Pipeline
//!
//! Every inbound scan runs synchronously through:
//!
//! 1. [`ScanSanitizer`]: clamp ranges, replace invalid readings, convert to xy
//! 2. [`DetectionAdapter`]: ask the detection engine for leg clusters
//! 3. [`PersonAggregator`]: one person estimate per cluster
//! 4. [`PublicationFanout`]: markers, text, people list, tracker measurements

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;
pub mod error;
pub mod utils;

// ============================================================================
// Layer 2: Sensor processing (depends on core)
// ============================================================================
pub mod sensors;

// ============================================================================
// Layer 3: Detection (depends on core)
// ============================================================================
pub mod detection;

// ============================================================================
// Layer 4: Aggregation and publication (depends on core, detection, io)
// ============================================================================
pub mod aggregation;
pub mod publication;

// ============================================================================
// Layer 5: I/O infrastructure
// ============================================================================
pub mod io;

// ============================================================================
// Layer 6: Orchestration
// ============================================================================
pub mod config;
pub mod driver;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

pub use error::{Error, Result};

// Core types
pub use core::types::{Covariance3D, PersonEstimate, PositionMeasurement};
pub use core::types::{Point2D, Point3D, PointCloud, ScanEvent};

// Pipeline stages
pub use aggregation::PersonAggregator;
pub use detection::{DetectionAdapter, DetectionEngine, DetectorConfig, FeatureSet, LegCluster};
pub use publication::{FanoutSinks, MarkerIdCounter, PublicationConfig, PublicationFanout};
pub use sensors::ScanSanitizer;

// Orchestration
pub use config::AppConfig;
pub use driver::{FrameDriver, FrameReport, FrameState};
