// ============================================
// File: crates/messageu-client/src/lib.rs
// ============================================
//! # MessageU Client - Messaging Pipeline Library
//!
//! ## Creation Reason
//! Ties the protocol engine, transport, and persistent stores together
//! into the client a user interface drives: register once, discover
//! peers, exchange keys, send and fetch encrypted messages.
//!
//! ## Main Functionality
//!
//! ### Modules
//! - [`client`]: `MessagingClient`, the single owner of every subsystem
//! - [`registry`]: in-memory table of known peers and their keys
//! - [`identity`]: persistent local identity (`my.info`)
//! - [`config`]: relay endpoint configuration (`server.info`)
//! - [`inbox`]: decoded incoming messages and the file-message sink
//! - [`error`]: client error types
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              messageu-client  ◄── You are here     │
//! │                    │                                │
//! │         ┌──────────┴──────────┐                    │
//! │         ▼                     ▼                    │
//! │   messageu-core        messageu-transport          │
//! │         │                     │                    │
//! │         └──────────┬──────────┘                    │
//! │                    ▼                               │
//! │             messageu-common                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! Single-threaded and synchronous. `MessagingClient` owns the stores
//! and the transport outright and lends them to operations by reference;
//! no locking, no background tasks, no shared mutability.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Every consumer-facing operation is boolean-equivalent and deposits
//!   its diagnostics in the error buffer; keep that contract
//! - Per-record inbox failures are non-fatal by design
//!
//! ## Last Modified
//! v0.1.0 - Initial client implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod inbox;
pub mod registry;

// Re-export primary types at crate root
pub use client::MessagingClient;
pub use error::{ClientError, Result};
pub use inbox::IncomingMessage;
