// ============================================
// File: crates/messageu-client/src/error.rs
// ============================================
//! # Client Error Types
//!
//! ## Creation Reason
//! Defines the error taxonomy the message pipeline surfaces to its
//! consumer, wrapping the codec, crypto, and transport errors of the
//! lower crates.
//!
//! ## Main Functionality
//! - `ClientError`: Primary error enum for pipeline operations
//! - Convenience constructors for the most common variants
//!
//! ## Propagation Model
//! Every error kind surfaces out of the originating operation; the
//! pipeline never retries transparently. The consumer-facing methods
//! render each error into one human-readable error-buffer line.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Error text reaches the terminal verbatim; include the peer name,
//!   message number, or file name, never key material
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

use messageu_common::error::CommonError;
use messageu_core::error::CoreError;
use messageu_transport::error::TransportError;

// ============================================
// Result Type Alias
// ============================================

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

// ============================================
// ClientError
// ============================================

/// Client error types for pipeline operations.
///
/// # Categories
/// - **Configuration**: missing or malformed `server.info` / `my.info`
/// - **State**: operations attempted in the wrong registration state
/// - **Peers**: unknown peers and missing key material
/// - **Files**: file-message I/O
/// - **Wrapped**: codec, crypto, and transport errors
#[derive(Error, Debug)]
pub enum ClientError {
    // ========================================
    // Configuration Errors
    // ========================================

    /// A required configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigMissing {
        /// Path that was looked up
        path: String,
    },

    /// A configuration file exists but cannot be parsed.
    #[error("Malformed configuration in {path}: {reason}")]
    ConfigMalformed {
        /// Path of the offending file
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// A display name failed validation.
    #[error("Invalid name: {reason}")]
    InvalidName {
        /// Why the name was rejected
        reason: String,
    },

    // ========================================
    // State Errors
    // ========================================

    /// The operation requires a registered local identity.
    #[error("Not registered: no local identity loaded")]
    IdentityNotRegistered,

    /// Registration attempted while an identity is already loaded.
    #[error("Already registered as '{name}'")]
    AlreadyRegistered {
        /// The existing identity's display name
        name: String,
    },

    // ========================================
    // Peer Errors
    // ========================================

    /// The requested peer is not in the registry.
    #[error("User '{peer}' not found. Please refresh the user list.")]
    UnknownPeer {
        /// Name or identity that missed
        peer: String,
    },

    /// The operation targets the local client itself.
    #[error("Cannot send {operation} to yourself")]
    SelfTarget {
        /// What was being attempted
        operation: String,
    },

    /// The peer lacks the key material the operation needs.
    #[error("{required} for '{peer}' not available")]
    PreconditionMissing {
        /// The peer in question
        peer: String,
        /// "Public key" or "Symmetric key"
        required: &'static str,
    },

    /// A response addressed a different identity than the request.
    #[error("Response identity mismatch: {context}")]
    ResponseMismatch {
        /// Which exchange observed the mismatch
        context: String,
    },

    // ========================================
    // File Errors
    // ========================================

    /// Identity store write failed.
    #[error("Failed to persist identity: {reason}")]
    PersistenceFailed {
        /// Why the write failed
        reason: String,
    },

    /// File to send was not found or not readable.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was requested
        path: String,
    },

    /// Writing a decrypted file message failed.
    #[error("Failed to write file {path}: {reason}")]
    FileWriteFailed {
        /// Destination path
        path: String,
        /// Why the write failed
        reason: String,
    },

    // ========================================
    // Wrapped Errors
    // ========================================

    /// Codec or crypto error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Transport error.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Error from common crate.
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl ClientError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `ConfigMissing` error.
    pub fn config_missing(path: impl Into<String>) -> Self {
        Self::ConfigMissing { path: path.into() }
    }

    /// Creates a `ConfigMalformed` error.
    pub fn config_malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigMalformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidName` error.
    pub fn invalid_name(reason: impl Into<String>) -> Self {
        Self::InvalidName {
            reason: reason.into(),
        }
    }

    /// Creates an `UnknownPeer` error.
    pub fn unknown_peer(peer: impl Into<String>) -> Self {
        Self::UnknownPeer { peer: peer.into() }
    }

    /// Creates a `PreconditionMissing` error.
    pub fn precondition_missing(peer: impl Into<String>, required: &'static str) -> Self {
        Self::PreconditionMissing {
            peer: peer.into(),
            required,
        }
    }

    /// Creates a `ResponseMismatch` error.
    pub fn response_mismatch(context: impl Into<String>) -> Self {
        Self::ResponseMismatch {
            context: context.into(),
        }
    }

    /// Creates a `PersistenceFailed` error.
    pub fn persistence_failed(reason: impl Into<String>) -> Self {
        Self::PersistenceFailed {
            reason: reason.into(),
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if the failure was detected locally, before any
    /// request went on the wire.
    #[must_use]
    pub const fn is_local_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigMissing { .. }
                | Self::ConfigMalformed { .. }
                | Self::InvalidName { .. }
                | Self::IdentityNotRegistered
                | Self::AlreadyRegistered { .. }
                | Self::UnknownPeer { .. }
                | Self::SelfTarget { .. }
                | Self::PreconditionMissing { .. }
                | Self::FileNotFound { .. }
        )
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
        let err = ClientError::unknown_peer("bob");
        assert!(err.to_string().contains("bob"));

        let err = ClientError::precondition_missing("carol", "Symmetric key");
        assert!(err.to_string().contains("carol"));
        assert!(err.to_string().contains("Symmetric key"));
    }

    #[test]
    fn test_error_classification() {
        assert!(ClientError::IdentityNotRegistered.is_local_error());
        assert!(ClientError::unknown_peer("x").is_local_error());

        let wrapped: ClientError = CoreError::ServerFailure.into();
        assert!(!wrapped.is_local_error());
    }

    #[test]
    fn test_wrapped_errors_preserve_message() {
        let wrapped: ClientError = CoreError::wrong_payload_size(176, 160).into();
        assert!(wrapped.to_string().contains("176"));

        let wrapped: ClientError = TransportError::NotConnected.into();
        assert!(wrapped.to_string().contains("not connected"));
    }
}
