//! Shared utilities: policy constants, shutdown signalling, clock.

pub mod constants;
pub mod signal;
pub mod time;

pub use signal::setup_ctrl_c_handler;
pub use time::now_us;
