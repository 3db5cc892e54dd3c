// ============================================
// File: crates/messageu-core/src/protocol/mod.rs
// ============================================
//! # Protocol Module
//!
//! ## Creation Reason
//! Groups everything that defines the on-wire contract with the relay
//! server: message/code definitions, the binary codec, and the protocol
//! version.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`messages`]: Request/response codes, message kinds, header structs
//! - [`codec`]: Little-endian encode/decode of every frame
//! - [`version`]: Protocol version constant and checks
//!
//! ## Wire Format Summary
//! ```text
//! Request:   ident[16] | version:u8 | code:u16 | payload_size:u32 | payload
//! Response:  version:u8 | code:u16 | payload_size:u32 | payload
//! ```
//! All integers little-endian, structures tightly packed.
//!
//! ## ⚠️ Important Note for Next Developer
//! - The relay tears the connection down after every exchange; there is
//!   no pipelining and no session state on the wire
//! - Raw byte fields (identities, keys, ciphertext) are never byte-swapped
//!
//! ## Last Modified
//! v0.1.0 - Initial protocol module

pub mod codec;
pub mod messages;
pub mod version;

// Re-export primary types at module level
pub use messages::{
    MessageKind, MessageSentAck, PendingRecord, PublicKeyRecord, RequestCode, RequestHeader,
    ResponseCode, ResponseHeader, UserRecord, MAX_NAME_SIZE, NAME_FIELD_SIZE,
    PENDING_RECORD_HEADER_SIZE, REQUEST_HEADER_SIZE, RESPONSE_HEADER_SIZE, USER_RECORD_SIZE,
};
pub use version::{ProtocolVersion, PROTOCOL_VERSION};
