//! Scan sources feeding the frame driver.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::core::types::ScanEvent;
use crate::error::{Error, Result};

/// Delivers inbound laser scans one at a time.
pub trait ScanSource {
    /// Wait up to `timeout` for the next scan.
    ///
    /// Returns `Ok(None)` when nothing arrived in time. An error means the
    /// source is gone for good and the caller should stop.
    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<ScanEvent>>;
}

/// Scans from an in-process crossbeam channel.
pub struct ChannelScanSource {
    rx: Receiver<ScanEvent>,
}

impl ChannelScanSource {
    pub fn new(rx: Receiver<ScanEvent>) -> Self {
        Self { rx }
    }
}

impl ScanSource for ChannelScanSource {
    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<ScanEvent>> {
        match self.rx.recv_timeout(timeout) {
            Ok(scan) => Ok(Some(scan)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                Err(Error::ChannelClosed("scan source".to_string()))
            }
        }
    }
}
