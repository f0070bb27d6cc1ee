//! Wire format serialization and framing.
//!
//! # Datagram Layout
//!
//! Every datagram, inbound scans and outbound envelopes alike, uses the same
//! length-prefixed framing:
//!
//! ```text
//! ┌──────────────────┬──────────────────────────┐
//! │ Length (4 bytes) │ Payload (variable)       │
//! │ Big-endian u32   │ JSON or Postcard binary  │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! ## Wire Formats
//!
//! ### JSON (Default)
//! Human-readable, easy to inspect with `nc -u` while tuning the detector.
//!
//! ### Postcard (Binary)
//! Compact encoding for high-rate scanners.
//!
//! ## Error Handling
//!
//! - **Short or truncated frame**: rejected with a serialization error
//! - **Oversized payload**: rejected before sending
//! - **Decode failure**: reported to the caller, who logs and drops the frame

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Length prefix size in bytes.
pub const FRAME_HEADER_LEN: usize = 4;

/// Maximum payload size (1 MB).
pub const MAX_PAYLOAD_SIZE: usize = 1 << 20;

/// Supported wire formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// Binary format using postcard - fast and compact
    Postcard,
    /// JSON format - human-readable for debugging
    #[default]
    Json,
}

/// Serializer for one wire format
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    format: WireFormat,
}

impl Serializer {
    /// Create a new serializer for the given format
    pub fn new(format: WireFormat) -> Self {
        Self { format }
    }

    /// Configured wire format
    pub fn format(&self) -> WireFormat {
        self.format
    }

    /// Serialize a value to bytes
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        match self.format {
            WireFormat::Postcard => {
                postcard::to_allocvec(value).map_err(|e| Error::Serialization(e.to_string()))
            }
            WireFormat::Json => {
                serde_json::to_vec(value).map_err(|e| Error::Serialization(e.to_string()))
            }
        }
    }

    /// Deserialize bytes to a value
    pub fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match self.format {
            WireFormat::Postcard => {
                postcard::from_bytes(bytes).map_err(|e| Error::Serialization(e.to_string()))
            }
            WireFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))
            }
        }
    }

    /// Serialize a value into `buffer` as one length-prefixed frame.
    ///
    /// The buffer is cleared first so it can be reused across sends.
    pub fn encode_frame<T: Serialize>(&self, value: &T, buffer: &mut Vec<u8>) -> Result<()> {
        let payload = self.serialize(value)?;
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::Serialization(format!(
                "payload of {} bytes exceeds {} byte limit",
                payload.len(),
                MAX_PAYLOAD_SIZE
            )));
        }

        buffer.clear();
        buffer.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        buffer.extend_from_slice(&payload);
        Ok(())
    }

    /// Decode one length-prefixed frame.
    pub fn decode_frame<T: DeserializeOwned>(&self, frame: &[u8]) -> Result<T> {
        self.deserialize(frame_payload(frame)?)
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(WireFormat::default())
    }
}

/// Extract the payload of a length-prefixed frame.
pub fn frame_payload(frame: &[u8]) -> Result<&[u8]> {
    if frame.len() < FRAME_HEADER_LEN {
        return Err(Error::Serialization(format!(
            "frame too short: {} bytes",
            frame.len()
        )));
    }

    let len = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]) as usize;
    if len > MAX_PAYLOAD_SIZE {
        return Err(Error::Serialization(format!(
            "declared payload of {} bytes exceeds limit",
            len
        )));
    }
    if frame.len() < FRAME_HEADER_LEN + len {
        return Err(Error::Serialization(format!(
            "frame incomplete: expected {} + {} bytes, got {}",
            len,
            FRAME_HEADER_LEN,
            frame.len()
        )));
    }

    Ok(&frame[FRAME_HEADER_LEN..FRAME_HEADER_LEN + len])
}
