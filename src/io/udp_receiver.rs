//! UDP receiver for inbound laser scans.
//!
//! Each datagram carries one [`ScanEvent`] in the length-prefixed framing of
//! [`crate::io::wire`]. Datagrams that are too short or fail to decode are
//! logged and skipped; only socket failures are reported to the caller.
//!
//! # Example
//!
//! ```ignore
//! use pada_detect::io::{ScanSource, UdpScanReceiver, Serializer, WireFormat};
//! use std::time::Duration;
//!
//! let mut receiver = UdpScanReceiver::bind("0.0.0.0:5560", Serializer::new(WireFormat::Json))?;
//! if let Some(scan) = receiver.recv_timeout(Duration::from_millis(100))? {
//!     println!("{} readings", scan.len());
//! }
//! ```

use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use super::source::ScanSource;
use super::wire::{FRAME_HEADER_LEN, Serializer};
use crate::core::types::ScanEvent;
use crate::error::Result;

/// Maximum UDP datagram size (64KB for fragmented packets).
const MAX_DATAGRAM_SIZE: usize = 65536;

/// Receives length-prefixed scans on a bound UDP socket.
pub struct UdpScanReceiver {
    socket: UdpSocket,
    serializer: Serializer,
    buffer: Vec<u8>,
    timeout: Option<Duration>,
    dropped: u64,
}

impl UdpScanReceiver {
    /// Bind to `addr` (e.g. "0.0.0.0:5560").
    pub fn bind(addr: &str, serializer: Serializer) -> Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        log::info!("UDP scan receiver bound to {}", socket.local_addr()?);
        Ok(Self {
            socket,
            serializer,
            buffer: vec![0u8; MAX_DATAGRAM_SIZE],
            timeout: None,
            dropped: 0,
        })
    }

    /// Address the socket is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Number of datagrams skipped as malformed.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        // Zero would mean "block forever" to the socket
        let timeout = timeout.max(Duration::from_millis(1));
        if self.timeout != Some(timeout) {
            self.socket.set_read_timeout(Some(timeout))?;
            self.timeout = Some(timeout);
        }
        Ok(())
    }
}

impl ScanSource for UdpScanReceiver {
    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<ScanEvent>> {
        self.set_timeout(timeout)?;

        let (len, src) = match self.socket.recv_from(&mut self.buffer) {
            Ok(result) => result,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => return Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if len < FRAME_HEADER_LEN {
            log::warn!("UDP datagram from {} too short: {} bytes", src, len);
            self.dropped += 1;
            return Ok(None);
        }

        match self.serializer.decode_frame::<ScanEvent>(&self.buffer[..len]) {
            Ok(scan) => {
                log::trace!(
                    "Scan {} from {}: {} readings",
                    scan.stamp_us,
                    src,
                    scan.len()
                );
                Ok(Some(scan))
            }
            Err(e) => {
                log::warn!("Dropping datagram from {}: {}", src, e);
                self.dropped += 1;
                Ok(None)
            }
        }
    }
}
