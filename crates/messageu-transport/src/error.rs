// ============================================
// File: crates/messageu-transport/src/error.rs
// ============================================
//! # Transport Error Types
//!
//! ## Creation Reason
//! Defines error types specific to transport layer operations:
//! connection establishment, framed writes, and exact reads.
//!
//! ## Main Functionality
//! - `TransportError`: Primary error enum for transport operations
//! - Error conversion from system errors
//! - Categorization helpers
//!
//! ## Error Categories
//! 1. **Connection Errors**: resolve/connect failures, use-before-connect
//! 2. **Stream Errors**: short writes, peer closing mid-read
//! 3. **System Errors**: wrapped I/O errors with context
//!
//! ## ⚠️ Important Note for Next Developer
//! - `PeerClosed` carries how many bytes arrived; the pipeline uses it
//!   to distinguish truncated payloads from dead servers
//! - Any stream error leaves the connection unusable; callers reconnect
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use std::io;

use thiserror::Error;

use messageu_common::error::CommonError;

// ============================================
// Result Type Alias
// ============================================

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

// ============================================
// TransportError
// ============================================

/// Transport layer error types.
///
/// # Categories
/// - **Connection**: establishing or lacking a connection
/// - **Stream**: send/receive failures on an open connection
/// - **System**: OS-level errors
#[derive(Error, Debug)]
pub enum TransportError {
    // ========================================
    // Connection Errors
    // ========================================

    /// Failed to resolve or connect to the server.
    #[error("Failed to connect to {endpoint}: {reason}")]
    ConnectFailed {
        /// Endpoint we tried to reach ("host:port")
        endpoint: String,
        /// Why connecting failed
        reason: String,
    },

    /// Operation attempted without an open connection.
    #[error("Socket not connected")]
    NotConnected,

    // ========================================
    // Stream Errors
    // ========================================

    /// Write did not complete; the connection is unusable afterwards.
    #[error("Failed to send request: {reason}")]
    WriteFailed {
        /// Why the write failed
        reason: String,
    },

    /// The peer closed the stream before the expected byte count arrived.
    #[error("Peer closed connection: expected {expected} bytes, received {received}")]
    PeerClosed {
        /// Bytes the caller asked for
        expected: usize,
        /// Bytes actually received before the close
        received: usize,
    },

    // ========================================
    // Wrapped Errors
    // ========================================

    /// I/O error from the system.
    #[error("I/O error: {context}")]
    Io {
        /// What was happening when the error occurred
        context: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error from common crate.
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl TransportError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `ConnectFailed` error.
    pub fn connect_failed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConnectFailed {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `WriteFailed` error.
    pub fn write_failed(reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            reason: reason.into(),
        }
    }

    /// Creates a `PeerClosed` error.
    pub const fn peer_closed(expected: usize, received: usize) -> Self {
        Self::PeerClosed { expected, received }
    }

    /// Creates an `Io` error with context.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if this error occurred while establishing the
    /// connection rather than using it.
    #[must_use]
    pub const fn is_connect_error(&self) -> bool {
        matches!(self, Self::ConnectFailed { .. } | Self::NotConnected)
    }

    /// Returns `true` if the peer ended the stream early.
    #[must_use]
    pub const fn is_peer_closed(&self) -> bool {
        matches!(self, Self::PeerClosed { .. })
    }
}

// ============================================
// Error Conversions
// ============================================

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            context: "unspecified I/O operation".into(),
            source: err,
        }
    }
}

// ============================================
// Tests
// ============================================
