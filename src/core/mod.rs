//! Core foundation layer.
//!
//! Bottom layer of the detector with no internal dependencies besides
//! policy constants. All other layers depend on core.

pub mod types;
