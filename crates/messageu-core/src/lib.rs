// ============================================
// File: crates/messageu-core/src/lib.rs
// ============================================
//! # MessageU Core - Protocol Engine Library
//!
//! ## Creation Reason
//! Implements the client side of the MessageU relay protocol: the binary
//! request/response framing and the two-tier cryptography (RSA key exchange
//! over AES message encryption) that rides on it.
//!
//! ## Main Functionality
//!
//! ### Modules
//! - [`protocol`]: Message definitions, binary codec, protocol version
//! - [`crypto`]: RSA-OAEP and AES-CBC primitives with key types
//! - [`error`]: Core error types
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              messageu-client                        │
//! │                    │                                │
//! │         ┌──────────┴──────────┐                    │
//! │         ▼                     ▼                    │
//! │   messageu-core        messageu-transport          │
//! │   You are here ◄──                                 │
//! │         │                     │                    │
//! │         └──────────┬──────────┘                    │
//! │                    ▼                               │
//! │             messageu-common                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Wire layouts are bit-exact contracts with deployed servers and peers;
//!   never change a field without a protocol version bump
//! - The crypto parameters (RSA-1024, OAEP-SHA1, AES-128-CBC zero IV) are
//!   protocol-fixed for interoperability - see DESIGN.md before "upgrading"
//!
//! ## Last Modified
//! v0.1.0 - Initial protocol engine

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod crypto;
pub mod error;
pub mod protocol;

// Re-export primary types at crate root
pub use error::{CoreError, Result};
pub use protocol::{MessageKind, RequestCode, ResponseCode};
