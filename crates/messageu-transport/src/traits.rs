// ============================================
// File: crates/messageu-transport/src/traits.rs
// ============================================
//! # Transport Traits
//!
//! ## Creation Reason
//! Defines the abstract interface for the blocking stream transport,
//! enabling testability and flexibility in implementation choices.
//!
//! ## Main Functionality
//! - `StreamTransport`: connect / send_all / recv_exact / disconnect,
//!   plus a provided `round_trip` for fixed-size exchanges
//!
//! ## Design Philosophy
//! - The trait enables mock implementations for testing
//! - All operations are blocking and synchronous; the engine owns the
//!   transport exclusively (no `Send`/`Sync` bound needed)
//! - Buffer management is the caller's responsibility
//!
//! ## ⚠️ Important Note for Next Developer
//! - `round_trip` must release the connection on EVERY exit path
//! - A failed `send_all` leaves the connection unusable by contract
//!
//! ## Last Modified
//! v0.1.0 - Initial trait definitions

use crate::error::Result;

// ============================================
// StreamTransport Trait
// ============================================

/// Abstract interface for a blocking, connection-per-exchange stream
/// transport.
///
/// # Connection Model
/// Each request is one complete packet followed by exactly one response;
/// the connection is torn down after the exchange. Implementations keep
/// no session state between exchanges.
///
/// # Example
/// ```ignore
/// fn fetch<T: StreamTransport>(transport: &mut T, request: &[u8]) -> Result<Vec<u8>> {
///     transport.connect("localhost", 1357)?;
///     transport.send_all(request)?;
///     let mut header = [0u8; 7];
///     transport.recv_exact(&mut header)?;
///     // ... read the declared payload, then:
///     transport.disconnect();
///     Ok(header.to_vec())
/// }
/// ```
pub trait StreamTransport {
    /// Resolves the host and opens a blocking connection.
    ///
    /// An already-open connection is torn down first.
    ///
    /// # Errors
    /// Returns `ConnectFailed` on any resolution or connection error.
    fn connect(&mut self, host: &str, port: u16) -> Result<()>;

    /// Writes the entire buffer, looping over partial writes.
    ///
    /// # Errors
    /// Returns `WriteFailed` on any underlying error; the connection is
    /// unusable afterwards.
    fn send_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Reads until the buffer is completely filled.
    ///
    /// # Errors
    /// Returns `PeerClosed` (with the byte count that did arrive) if the
    /// peer shuts the stream first.
    fn recv_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Gracefully shuts down and closes the connection. Idempotent.
    fn disconnect(&mut self);

    /// Returns `true` if a connection is currently open.
    fn is_connected(&self) -> bool;

    /// Performs one complete exchange with a response of known size:
    /// connect, send the request, read exactly `response_size` bytes,
    /// disconnect.
    ///
    /// Used only when the response size is exactly known in advance
    /// (registration, public-key fetch, message-sent ack). The connection
    /// is released on all exit paths.
    ///
    /// # Errors
    /// Propagates the first connect, send, or receive error.
    fn round_trip(
        &mut self,
        host: &str,
        port: u16,
        request: &[u8],
        response_size: usize,
    ) -> Result<Vec<u8>> {
        self.connect(host, port)?;
        let outcome = (|| {
            self.send_all(request)?;
            let mut response = vec![0u8; response_size];
            self.recv_exact(&mut response)?;
            Ok(response)
        })();
        self.disconnect();
        outcome
    }
}

// ============================================
// Tests
// ============================================
