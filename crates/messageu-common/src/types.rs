// ============================================
// File: crates/messageu-common/src/types.rs
// ============================================
//! # Core Type Definitions
//!
//! ## Creation Reason
//! Centralizes fundamental type definitions used throughout the MessageU
//! client, ensuring type safety and consistent representations.
//!
//! ## Main Functionality
//! - `ClientId`: Opaque server-assigned identity (16 bytes)
//! - Hex round-trip used by the identity file and display paths
//!
//! ## Main Logical Flow
//! 1. A zeroed `ClientId` is sent in the registration request
//! 2. The server assigns the real identity in its response
//! 3. The identity keys every peer-registry lookup afterwards
//! 4. It is persisted as 32 lowercase hex digits on line 2 of `my.info`
//!
//! ## ⚠️ Important Note for Next Developer
//! - The all-zero value is the "unassigned" sentinel, never a real identity
//! - Comparison is plain byte-wise equality
//! - Maintain the lowercase 32-hex-digit persistence format
//!
//! ## Last Modified
//! v0.1.0 - Initial type definitions

use std::fmt;
use std::str::FromStr;

// ============================================
// Constants
// ============================================

/// Size of a `ClientId` in bytes.
pub const CLIENT_ID_SIZE: usize = 16;

// ============================================
// ClientId Error Type
// ============================================

/// Error type for `ClientId` parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientIdError {
    /// Hex decoding failed.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
    /// Decoded bytes have wrong length.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },
}

// ============================================
// ClientId
// ============================================

/// Opaque 16-byte identity assigned by the relay server.
///
/// # Properties
/// - Fixed 16-byte size, compared byte-wise
/// - The all-zero value is the "unassigned" sentinel used in the
///   registration request
/// - Not secret: it names a client, it does not authenticate one
///
/// # Wire Format
/// ```text
/// ┌────────────────────────────────────┐
/// │       Client ID (16 bytes)         │
/// │   Leads every request header and   │
/// │   addresses peers in payloads      │
/// └────────────────────────────────────┘
/// ```
///
/// # Example
/// ```
/// use messageu_common::types::ClientId;
///
/// let id: ClientId = "0102030405060708090a0b0c0d0e0f10".parse().unwrap();
/// assert_eq!(id.to_hex(), "0102030405060708090a0b0c0d0e0f10");
/// assert!(!id.is_zero());
/// assert!(ClientId::zero().is_zero());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId([u8; CLIENT_ID_SIZE]);

impl ClientId {
    /// Creates a `ClientId` from raw bytes.
    ///
    /// # Returns
    /// - `Some(ClientId)` if bytes length is correct
    /// - `None` if bytes length is not 16
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != CLIENT_ID_SIZE {
            return None;
        }
        let mut id = [0u8; CLIENT_ID_SIZE];
        id.copy_from_slice(bytes);
        Some(Self(id))
    }

    /// Returns the all-zero sentinel identity ("unassigned").
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; CLIENT_ID_SIZE])
    }

    /// Returns `true` if this is the unassigned sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; CLIENT_ID_SIZE]
    }

    /// Returns the raw bytes of the identity.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; CLIENT_ID_SIZE] {
        &self.0
    }

    /// Renders the identity as 32 lowercase hex digits (no separators).
    ///
    /// This is the persistence format of line 2 of the identity file.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses an identity from 32 hex digits.
    ///
    /// # Errors
    /// Returns an error if the input is not valid hex or does not decode
    /// to exactly 16 bytes.
    pub fn from_hex(s: &str) -> Result<Self, ClientIdError> {
        let bytes = hex::decode(s.trim()).map_err(|e| ClientIdError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes).ok_or(ClientIdError::InvalidLength {
            expected: CLIENT_ID_SIZE,
            actual: bytes.len(),
        })
    }
}

impl fmt::Debug for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only show first 4 bytes in debug output
        write!(
            f,
            "ClientId({:02x}{:02x}{:02x}{:02x}...)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for ClientId {
    type Err = ClientIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for ClientId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; CLIENT_ID_SIZE]> for ClientId {
    fn from(bytes: [u8; CLIENT_ID_SIZE]) -> Self {
        Self(bytes)
    }
}

// ============================================
// Tests
// ============================================
