// ============================================
// File: crates/messageu-core/src/error.rs
// ============================================
//! # Core Error Types
//!
//! ## Creation Reason
//! Defines error types specific to protocol framing and cryptographic
//! operations in the MessageU core crate.
//!
//! ## Main Functionality
//! - `CoreError`: Primary error enum for core operations
//! - Convenience constructors and classification helpers
//!
//! ## Error Categories
//! 1. **Crypto Errors**: Key generation, encryption, decryption failures
//! 2. **Framing Errors**: Header parsing, size validation, record bounds
//! 3. **Server Errors**: The server-signalled failure code (9000)
//!
//! ## ⚠️ Important Note for Next Developer
//! - NEVER include key material in error messages
//! - Keep error messages informative but secure
//! - All errors should be loggable without leaking secrets
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

use messageu_common::error::CommonError;

// ============================================
// Result Type Alias
// ============================================

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

// ============================================
// CoreError
// ============================================

/// Core error types for protocol framing and cryptographic operations.
///
/// # Security Note
/// Error messages are designed to be informative for debugging
/// without revealing sensitive information like key material.
#[derive(Error, Debug)]
pub enum CoreError {
    // ========================================
    // Cryptographic Errors
    // ========================================

    /// Failed to generate or load cryptographic key material.
    #[error("Key setup failed: {context}")]
    KeySetup {
        /// What key was being generated or parsed
        context: String,
    },

    /// Encryption operation failed.
    #[error("Encryption failed: {context}")]
    Encryption {
        /// What was being encrypted
        context: String,
    },

    /// Decryption operation failed (bad padding, wrong key, or garbage).
    #[error("Decryption failed")]
    Decryption,

    /// Key material has the wrong length.
    #[error("Bad key length: expected {expected} bytes, got {actual}")]
    BadKeyLength {
        /// Expected key size in bytes
        expected: usize,
        /// Actual size received
        actual: usize,
    },

    // ========================================
    // Framing Errors
    // ========================================

    /// Response header could not be parsed.
    #[error("Malformed response header: {reason}")]
    MalformedHeader {
        /// What's wrong with the header
        reason: String,
    },

    /// Response carried a code other than the one the request expects.
    #[error("Unexpected response code: {got} (expected {expected})")]
    UnexpectedCode {
        /// Code received from the server
        got: u16,
        /// Code the request expects
        expected: u16,
    },

    /// The server signalled a failure for the preceding request (code 9000).
    #[error("Server returned error response code")]
    ServerFailure,

    /// A fixed-size response declared the wrong payload size.
    #[error("Invalid payload size: {actual} (expected {expected})")]
    WrongPayloadSize {
        /// Size the response code requires
        expected: usize,
        /// Size the header declared
        actual: usize,
    },

    /// The transport delivered fewer payload bytes than the header declared.
    #[error("Truncated payload: expected {expected} bytes, received {actual}")]
    TruncatedPayload {
        /// Bytes the header declared
        expected: usize,
        /// Bytes actually delivered
        actual: usize,
    },

    /// A record inside a variable-length payload extends past its end.
    #[error("Record boundary violation at offset {offset} of {payload_size}-byte payload")]
    RecordBoundary {
        /// Offset where the malformed record starts
        offset: usize,
        /// Total payload size
        payload_size: usize,
    },

    /// Content would overflow the u32 size field on the wire.
    #[error("Payload too large: max {max} bytes, got {actual}")]
    PayloadTooLarge {
        /// Maximum encodable size
        max: usize,
        /// Actual size requested
        actual: usize,
    },

    // ========================================
    // Wrapped Errors
    // ========================================

    /// Error from common crate.
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl CoreError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `KeySetup` error.
    pub fn key_setup(context: impl Into<String>) -> Self {
        Self::KeySetup {
            context: context.into(),
        }
    }

    /// Creates an `Encryption` error.
    pub fn encryption(context: impl Into<String>) -> Self {
        Self::Encryption {
            context: context.into(),
        }
    }

    /// Creates a `BadKeyLength` error.
    pub const fn bad_key_length(expected: usize, actual: usize) -> Self {
        Self::BadKeyLength { expected, actual }
    }

    /// Creates a `MalformedHeader` error.
    pub fn malformed_header(reason: impl Into<String>) -> Self {
        Self::MalformedHeader {
            reason: reason.into(),
        }
    }

    /// Creates an `UnexpectedCode` error.
    pub const fn unexpected_code(got: u16, expected: u16) -> Self {
        Self::UnexpectedCode { got, expected }
    }

    /// Creates a `WrongPayloadSize` error.
    pub const fn wrong_payload_size(expected: usize, actual: usize) -> Self {
        Self::WrongPayloadSize { expected, actual }
    }

    /// Creates a `TruncatedPayload` error.
    pub const fn truncated(expected: usize, actual: usize) -> Self {
        Self::TruncatedPayload { expected, actual }
    }

    /// Creates a `RecordBoundary` error.
    pub const fn record_boundary(offset: usize, payload_size: usize) -> Self {
        Self::RecordBoundary {
            offset,
            payload_size,
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if this is a cryptographic error.
    #[must_use]
    pub const fn is_crypto_error(&self) -> bool {
        matches!(
            self,
            Self::KeySetup { .. }
                | Self::Encryption { .. }
                | Self::Decryption
                | Self::BadKeyLength { .. }
        )
    }

    /// Returns `true` if this is a framing error.
    ///
    /// Framing errors indicate a malformed or unexpected response and
    /// always abort the operation that observed them.
    #[must_use]
    pub const fn is_framing_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedHeader { .. }
                | Self::UnexpectedCode { .. }
                | Self::WrongPayloadSize { .. }
                | Self::TruncatedPayload { .. }
                | Self::RecordBoundary { .. }
        )
    }

    /// Returns `true` if the server itself reported the failure.
    #[must_use]
    pub const fn is_server_failure(&self) -> bool {
        matches!(self, Self::ServerFailure)
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::unexpected_code(9000, 2100);
        assert!(err.to_string().contains("9000"));
        assert!(err.to_string().contains("2100"));

        let err = CoreError::wrong_payload_size(176, 160);
        assert!(err.to_string().contains("176"));
        assert!(err.to_string().contains("160"));
    }

    #[test]
    fn test_error_classification() {
        assert!(CoreError::Decryption.is_crypto_error());
        assert!(!CoreError::Decryption.is_framing_error());

        assert!(CoreError::record_boundary(271, 300).is_framing_error());
        assert!(CoreError::truncated(100, 50).is_framing_error());

        assert!(CoreError::ServerFailure.is_server_failure());
        assert!(!CoreError::ServerFailure.is_framing_error());
    }

    #[test]
    fn test_common_error_conversion() {
        let common = CommonError::invalid_input("field", "bad value");
        let core: CoreError = common.into();
        assert!(matches!(core, CoreError::Common(_)));
    }
}
