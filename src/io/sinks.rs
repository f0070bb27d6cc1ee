//! Outbound message sinks.
//!
//! A sink delivers envelopes for one topic. Delivery is fire-and-forget:
//! callers log a failed send and move on to the next sink.

use std::net::{SocketAddr, UdpSocket};

use crossbeam_channel::{Sender, TrySendError};

use super::messages::{Envelope, Message};
use super::wire::Serializer;
use crate::error::{Error, Result};

/// Maximum UDP datagram size; larger frames are rejected before sending.
const MAX_DATAGRAM_SIZE: usize = 65507;

/// Destination for messages published on one topic.
pub trait MessageSink: Send {
    /// Topic name this sink publishes on.
    fn topic(&self) -> &str;

    /// Deliver one message.
    fn send(&mut self, message: Message) -> Result<()>;
}

// ============================================================================
// UDP
// ============================================================================

/// Sends length-prefixed envelopes as UDP datagrams to a fixed target.
pub struct UdpSink {
    topic: String,
    socket: UdpSocket,
    target: SocketAddr,
    serializer: Serializer,
    send_buffer: Vec<u8>,
}

impl UdpSink {
    /// Bind an ephemeral local socket for sending to `target`.
    pub fn new(topic: impl Into<String>, target: SocketAddr, serializer: Serializer) -> Result<Self> {
        let bind_addr = if target.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let socket = UdpSocket::bind(bind_addr)?;
        Ok(Self::with_socket(topic, socket, target, serializer))
    }

    /// Use an existing socket; several sinks may share clones of one socket.
    pub fn with_socket(
        topic: impl Into<String>,
        socket: UdpSocket,
        target: SocketAddr,
        serializer: Serializer,
    ) -> Self {
        let topic = topic.into();
        log::debug!("UDP sink '{}' -> {}", topic, target);
        Self {
            topic,
            socket,
            target,
            serializer,
            send_buffer: Vec::with_capacity(4096),
        }
    }

    /// Destination address.
    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl MessageSink for UdpSink {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn send(&mut self, message: Message) -> Result<()> {
        let envelope = Envelope::new(self.topic.clone(), message);
        self.serializer.encode_frame(&envelope, &mut self.send_buffer)?;

        if self.send_buffer.len() > MAX_DATAGRAM_SIZE {
            return Err(Error::Serialization(format!(
                "{} byte frame does not fit a UDP datagram",
                self.send_buffer.len()
            )));
        }

        self.socket.send_to(&self.send_buffer, self.target)?;
        Ok(())
    }
}

// ============================================================================
// In-process channel
// ============================================================================

/// Forwards envelopes to an in-process crossbeam channel.
///
/// Never blocks: a full channel drops the message with an error.
pub struct ChannelSink {
    topic: String,
    tx: Sender<Envelope>,
}

impl ChannelSink {
    pub fn new(topic: impl Into<String>, tx: Sender<Envelope>) -> Self {
        Self {
            topic: topic.into(),
            tx,
        }
    }
}

impl MessageSink for ChannelSink {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn send(&mut self, message: Message) -> Result<()> {
        let envelope = Envelope::new(self.topic.clone(), message);
        self.tx.try_send(envelope).map_err(|e| match e {
            TrySendError::Full(_) => Error::Other(format!("channel for '{}' is full", self.topic)),
            TrySendError::Disconnected(_) => Error::ChannelClosed(self.topic.clone()),
        })
    }
}
