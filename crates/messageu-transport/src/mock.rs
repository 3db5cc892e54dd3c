// ============================================
// File: crates/messageu-transport/src/mock.rs
// ============================================
//! # Mock Transport Implementation
//!
//! ## Creation Reason
//! Provides a scripted in-memory transport for testing the message
//! pipeline without a real relay server or network access.
//!
//! ## Main Functionality
//! - Queue of canned response streams, one per exchange
//! - Capture of every sent request for verification
//! - Faithful `PeerClosed` behaviour when a script runs dry
//!
//! ## Usage in Tests
//! ```
//! use messageu_transport::{MockTransport, StreamTransport};
//!
//! let mut transport = MockTransport::new();
//! transport.push_response(b"canned response".to_vec());
//!
//! let response = transport.round_trip("server", 1357, b"request", 15).unwrap();
//! assert_eq!(response, b"canned response");
//! assert_eq!(transport.sent_requests()[0], b"request");
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - This is for testing only - do not use in production
//! - Each `connect` consumes the next scripted response; order matters
//! - An exhausted or short script surfaces as `PeerClosed`, exactly like
//!   a server hanging up early
//!
//! ## Last Modified
//! v0.1.0 - Initial mock implementation

use std::collections::VecDeque;

use crate::error::{Result, TransportError};
use crate::traits::StreamTransport;

// ============================================
// MockTransport
// ============================================

/// Scripted transport for tests.
///
/// # Model
/// Each `connect` begins a new exchange and arms the next queued
/// response stream; `recv_exact` serves bytes from it until it is
/// drained, after which the "peer" has closed.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Scripted response streams, one per upcoming exchange.
    script: VecDeque<Vec<u8>>,
    /// Remaining bytes of the current exchange's response.
    current: Option<VecDeque<u8>>,
    /// Every buffer passed to `send_all`, in order.
    sent: Vec<Vec<u8>>,
    /// Number of `connect` calls observed.
    connects: usize,
    connected: bool,
}

impl MockTransport {
    /// Creates a mock with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response stream for the next exchange.
    ///
    /// The bytes should contain a complete response (header and payload
    /// concatenated), exactly as a server would put them on the wire.
    pub fn push_response(&mut self, response: Vec<u8>) {
        self.script.push_back(response);
    }

    /// Returns every request captured so far, in send order.
    #[must_use]
    pub fn sent_requests(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Returns how many times `connect` was called.
    #[must_use]
    pub fn connect_count(&self) -> usize {
        self.connects
    }
}

impl StreamTransport for MockTransport {
    fn connect(&mut self, _host: &str, _port: u16) -> Result<()> {
        self.disconnect();
        self.connects += 1;
        // An empty script behaves like a server that accepts and
        // immediately hangs up
        self.current = Some(self.script.pop_front().unwrap_or_default().into());
        self.connected = true;
        Ok(())
    }

    fn send_all(&mut self, bytes: &[u8]) -> Result<()> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        self.sent.push(bytes.to_vec());
        Ok(())
    }

    fn recv_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        let current = self.current.as_mut().ok_or(TransportError::NotConnected)?;

        for (i, slot) in buf.iter_mut().enumerate() {
            match current.pop_front() {
                Some(byte) => *slot = byte,
                None => {
                    let expected = buf.len();
                    self.disconnect();
                    return Err(TransportError::peer_closed(expected, i));
                }
            }
        }
        Ok(())
    }

    fn disconnect(&mut self) {
        self.current = None;
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

// ============================================
// Tests
// ============================================
