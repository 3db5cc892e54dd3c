// ============================================
// File: crates/messageu-core/src/protocol/messages.rs
// ============================================
//! # Protocol Message Definitions
//!
//! ## Creation Reason
//! Defines the structure of all protocol messages exchanged between
//! MessageU clients and the relay server.
//!
//! ## Main Functionality
//! - `RequestCode` / `ResponseCode`: wire codes for both directions
//! - `MessageKind`: the four client-to-client message types
//! - `RequestHeader` / `ResponseHeader`: fixed header structs
//! - Decoded payload records (`UserRecord`, `PendingRecord`, ...)
//!
//! ## Message Sizes
//! | Frame | Size (bytes) |
//! |-------|--------------|
//! | Request header | 23 |
//! | Response header | 7 |
//! | Users record | 271 |
//! | Pending record header | 25 |
//!
//! ## Wire Format (Little Endian)
//! All multi-byte integers are encoded in little-endian byte order.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Field order is critical - DO NOT reorder without a version bump
//! - Fixed payload sizes are validated on parse
//! - The registration request transmits an all-zero identity
//!
//! ## Last Modified
//! v0.1.0 - Initial message definitions

use messageu_common::types::{ClientId, CLIENT_ID_SIZE};

use crate::crypto::PUBLIC_KEY_SIZE;
use crate::protocol::version::PROTOCOL_VERSION;

// ============================================
// Size Constants
// ============================================

/// Size of the request header in bytes (`ident[16] | version | code | size`).
pub const REQUEST_HEADER_SIZE: usize = CLIENT_ID_SIZE + 1 + 2 + 4;

/// Size of the response header in bytes (`version | code | size`).
pub const RESPONSE_HEADER_SIZE: usize = 1 + 2 + 4;

/// Size of the zero-padded, null-terminated name field on the wire.
pub const NAME_FIELD_SIZE: usize = 255;

/// Maximum display-name length in bytes (one byte is the terminator).
pub const MAX_NAME_SIZE: usize = NAME_FIELD_SIZE - 1;

/// Size of one record in a Users response (`ident[16] | name[255]`).
pub const USER_RECORD_SIZE: usize = CLIENT_ID_SIZE + NAME_FIELD_SIZE;

/// Size of a pending-message record header
/// (`from[16] | message_id:u32 | msg_type:u8 | content_size:u32`).
pub const PENDING_RECORD_HEADER_SIZE: usize = CLIENT_ID_SIZE + 4 + 1 + 4;

/// Payload size of a registration request (`name[255] | pubkey[160]`).
pub const REGISTER_PAYLOAD_SIZE: usize = NAME_FIELD_SIZE + PUBLIC_KEY_SIZE;

/// Payload size of a Registered (2100) response.
pub const REGISTERED_PAYLOAD_SIZE: usize = CLIENT_ID_SIZE;

/// Payload size of a PublicKey (2102) response (`ident[16] | pubkey[160]`).
pub const PUBLIC_KEY_PAYLOAD_SIZE: usize = CLIENT_ID_SIZE + PUBLIC_KEY_SIZE;

/// Payload size of a MessageSent (2103) response (`ident[16] | message_id`).
pub const MESSAGE_SENT_PAYLOAD_SIZE: usize = CLIENT_ID_SIZE + 4;

/// Fixed prefix of a SendMessage payload
/// (`dest[16] | msg_type:u8 | content_size:u32`), before the content.
pub const SEND_MESSAGE_PREFIX_SIZE: usize = CLIENT_ID_SIZE + 1 + 4;

// ============================================
// RequestCode
// ============================================

/// Client-to-server request codes.
///
/// # Values
/// | Code | Request |
/// |------|---------|
/// | 600  | Register |
/// | 601  | ClientsList |
/// | 602  | PublicKey |
/// | 603  | SendMessage |
/// | 604  | PendingMessages |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum RequestCode {
    /// Register a new client (identity field transmitted as zeros).
    Register = 600,
    /// Request the list of registered clients (empty payload).
    ClientsList = 601,
    /// Request another client's public key.
    PublicKey = 602,
    /// Send a message to another client.
    SendMessage = 603,
    /// Fetch messages waiting for this client (empty payload).
    PendingMessages = 604,
}

impl RequestCode {
    /// Converts a wire value to a `RequestCode`.
    #[must_use]
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            600 => Some(Self::Register),
            601 => Some(Self::ClientsList),
            602 => Some(Self::PublicKey),
            603 => Some(Self::SendMessage),
            604 => Some(Self::PendingMessages),
            _ => None,
        }
    }

    /// Returns the wire value of this code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        *self as u16
    }
}

// ============================================
// ResponseCode
// ============================================

/// Server-to-client response codes.
///
/// # Values
/// | Code | Response |
/// |------|----------|
/// | 2100 | Registered |
/// | 2101 | Users |
/// | 2102 | PublicKey |
/// | 2103 | MessageSent |
/// | 2104 | Pending |
/// | 9000 | Error |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ResponseCode {
    /// Registration succeeded; payload is the assigned identity.
    Registered = 2100,
    /// Zero or more user records.
    Users = 2101,
    /// Requested client's public key.
    PublicKey = 2102,
    /// Message accepted; payload echoes the destination and a message id.
    MessageSent = 2103,
    /// Zero or more pending-message records.
    Pending = 2104,
    /// Server-side failure for the preceding request (empty payload).
    Error = 9000,
}

impl ResponseCode {
    /// Converts a wire value to a `ResponseCode`.
    #[must_use]
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            2100 => Some(Self::Registered),
            2101 => Some(Self::Users),
            2102 => Some(Self::PublicKey),
            2103 => Some(Self::MessageSent),
            2104 => Some(Self::Pending),
            9000 => Some(Self::Error),
            _ => None,
        }
    }

    /// Returns the wire value of this code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Returns the payload size this code requires, if it is fixed.
    ///
    /// Variable-length responses (Users, Pending) return `None` and are
    /// validated record-by-record instead.
    #[must_use]
    pub const fn fixed_payload_size(&self) -> Option<usize> {
        match self {
            Self::Registered => Some(REGISTERED_PAYLOAD_SIZE),
            Self::PublicKey => Some(PUBLIC_KEY_PAYLOAD_SIZE),
            Self::MessageSent => Some(MESSAGE_SENT_PAYLOAD_SIZE),
            Self::Error => Some(0),
            Self::Users | Self::Pending => None,
        }
    }
}

// ============================================
// MessageKind
// ============================================

/// Client-to-client message type, carried in SendMessage payloads and
/// pending-message records.
///
/// # Values
/// | Value | Kind | Content |
/// |-------|------|---------|
/// | 1 | KeyRequest | empty |
/// | 2 | KeySend | AES key encrypted with the peer's RSA public key |
/// | 3 | Text | UTF-8 text encrypted with the pair's AES key |
/// | 4 | File | file bytes encrypted with the pair's AES key |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    /// Ask the peer to send a symmetric key.
    KeyRequest = 1,
    /// Deliver a freshly generated symmetric key.
    KeySend = 2,
    /// Encrypted text message.
    Text = 3,
    /// Encrypted file content.
    File = 4,
}

impl MessageKind {
    /// Converts a wire byte to a `MessageKind`.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::KeyRequest),
            2 => Some(Self::KeySend),
            3 => Some(Self::Text),
            4 => Some(Self::File),
            _ => None,
        }
    }

    /// Returns the wire byte of this kind.
    #[must_use]
    pub const fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Returns `true` if sending this kind requires the peer's public key.
    #[must_use]
    pub const fn needs_public_key(&self) -> bool {
        matches!(self, Self::KeySend)
    }

    /// Returns `true` if sending this kind requires a shared symmetric key.
    #[must_use]
    pub const fn needs_symmetric_key(&self) -> bool {
        matches!(self, Self::Text | Self::File)
    }

    /// Human-readable label used in diagnostics ("cannot send X to yourself").
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::KeyRequest => "symmetric key request",
            Self::KeySend => "symmetric key",
            Self::Text => "text message",
            Self::File => "file",
        }
    }
}

// ============================================
// RequestHeader
// ============================================

/// Fixed 23-byte header that leads every request.
///
/// # Wire Format (23 bytes)
/// ```text
/// ┌────────────────────────────────────────────┐
/// │ client_id (16 bytes)          │ zeros for  │
/// │                               │ Register   │
/// ├────────────────────────────────────────────┤
/// │ version (1 byte)              │ always 2   │
/// ├────────────────────────────────────────────┤
/// │ code (2 bytes, LE)            │ 600..604   │
/// ├────────────────────────────────────────────┤
/// │ payload_size (4 bytes, LE)    │            │
/// └────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHeader {
    /// Sender identity (all zeros in the registration request).
    pub client_id: ClientId,
    /// Protocol version (always 2).
    pub version: u8,
    /// Request code.
    pub code: RequestCode,
    /// Payload size in bytes.
    pub payload_size: u32,
}

impl RequestHeader {
    /// Creates a new request header stamped with the current version.
    #[must_use]
    pub fn new(client_id: ClientId, code: RequestCode, payload_size: u32) -> Self {
        Self {
            client_id,
            version: PROTOCOL_VERSION,
            code,
            payload_size,
        }
    }

    /// Returns the serialized size of a request header.
    #[must_use]
    pub const fn wire_size() -> usize {
        REQUEST_HEADER_SIZE
    }
}

// ============================================
// ResponseHeader
// ============================================

/// Fixed 7-byte header that leads every response.
///
/// The code is kept raw because servers may send values outside the known
/// set; classification happens during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    /// Protocol version reported by the server.
    pub version: u8,
    /// Raw response code.
    pub code: u16,
    /// Payload size in bytes.
    pub payload_size: u32,
}

impl ResponseHeader {
    /// Returns the known response code, if the raw value is one.
    #[must_use]
    pub const fn code(&self) -> Option<ResponseCode> {
        ResponseCode::from_u16(self.code)
    }

    /// Returns the serialized size of a response header.
    #[must_use]
    pub const fn wire_size() -> usize {
        RESPONSE_HEADER_SIZE
    }
}

// ============================================
// Decoded Payload Records
// ============================================

/// One record of a Users (2101) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// The client's identity.
    pub id: ClientId,
    /// The client's display name (trailing NULs stripped).
    pub name: String,
}

/// Decoded PublicKey (2102) response payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyRecord {
    /// Identity the key belongs to (must match the request).
    pub id: ClientId,
    /// Serialized RSA public key, opaque to the codec.
    pub public_key: [u8; PUBLIC_KEY_SIZE],
}

/// Decoded MessageSent (2103) response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSentAck {
    /// Destination identity echoed by the server (must match the request).
    pub dest: ClientId,
    /// Server-assigned message identifier.
    pub message_id: u32,
}

/// One record of a Pending (2104) response.
///
/// The kind byte is kept raw: unknown values are a per-record condition
/// the pipeline skips, not a framing error that aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecord {
    /// Sender identity.
    pub from: ClientId,
    /// Server-assigned message identifier.
    pub message_id: u32,
    /// Raw message type byte.
    pub kind: u8,
    /// Encrypted content (or empty for key requests).
    pub content: Vec<u8>,
}

impl PendingRecord {
    /// Returns the message kind, if the raw byte is a known one.
    #[must_use]
    pub const fn kind(&self) -> Option<MessageKind> {
        MessageKind::from_byte(self.kind)
    }
}

// ============================================
// Tests
// ============================================
