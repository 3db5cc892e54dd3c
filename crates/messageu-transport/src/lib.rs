// ============================================
// File: crates/messageu-transport/src/lib.rs
// ============================================
//! # MessageU Transport - Network I/O Layer
//!
//! ## Creation Reason
//! Provides the blocking stream transport the protocol engine drives:
//! one TCP connection per request/response exchange, framed by exact
//! reads and full writes.
//!
//! ## Main Functionality
//!
//! ### Modules
//! - [`traits`]: `StreamTransport` trait definition for abstraction
//! - [`tcp`]: Blocking TCP implementation
//! - [`mock`]: Scripted in-memory implementation for tests
//! - [`error`]: Transport-specific error types
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              messageu-client                        │
//! │                    │                                │
//! │         ┌──────────┴──────────┐                    │
//! │         ▼                     ▼                    │
//! │   messageu-core        messageu-transport          │
//! │                        You are here ◄──            │
//! │         │                     │                    │
//! │         └──────────┬──────────┘                    │
//! │                    ▼                               │
//! │             messageu-common                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Connection Model
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  connect ──► send_all(request) ──► recv_exact(...)       │
//! │                                        │                 │
//! │                                        ▼                 │
//! │                                   disconnect             │
//! │                                                          │
//! │  One complete packet, one response, then teardown.       │
//! │  No pipelining, no long-lived session, no TLS.           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Everything here blocks; the engine is single-threaded by design
//! - Always use the trait in consumers for testability
//! - Integers cross this layer as opaque bytes; the codec owns byte order
//!
//! ## Last Modified
//! v0.1.0 - Initial transport layer implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod mock;
pub mod tcp;
pub mod traits;

// Re-export primary types
pub use error::{Result, TransportError};
pub use mock::MockTransport;
pub use tcp::TcpTransport;
pub use traits::StreamTransport;

/// Size of the read chunks used when draining a response stream.
pub const READ_CHUNK_SIZE: usize = 1024;
