// ============================================
// File: crates/messageu-client/src/inbox.rs
// ============================================
//! # Inbox Types and File Sink
//!
//! ## Creation Reason
//! Defines the decoded form of fetched messages and the temp-directory
//! sink that decrypted file messages are written into.
//!
//! ## Main Functionality
//! - `IncomingMessage`: sender name + readable body
//! - `save_file_message`: writes decrypted bytes to
//!   `<system-temp-dir>/MessageU/<peer>_<unix-millis>`
//!
//! ## ⚠️ Important Note for Next Developer
//! - Paths use the platform-native separator; never hard-code one
//! - The sink directory is created on demand
//!
//! ## Last Modified
//! v0.1.0 - Initial inbox types

use std::path::PathBuf;

use messageu_common::time::unix_timestamp_millis;

use crate::error::{ClientError, Result};

// ============================================
// Constants
// ============================================

/// Name of the sink directory under the system temp directory.
pub const INBOX_DIR_NAME: &str = "MessageU";

/// Body shown for an incoming symmetric key request.
pub const KEY_REQUEST_NOTICE: &str = "Symmetric key request";

/// Body shown for a successfully installed incoming symmetric key.
pub const KEY_RECEIVED_NOTICE: &str = "Symmetric key received";

// ============================================
// IncomingMessage
// ============================================

/// One decoded message from the inbox.
///
/// The body is the decrypted text, the path a decrypted file was written
/// to, or a fixed notice for key-exchange messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Sender's display name (synthesized for unknown identities).
    pub from: String,
    /// Readable message body.
    pub body: String,
}

impl IncomingMessage {
    /// Creates an incoming message.
    #[must_use]
    pub fn new(from: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            body: body.into(),
        }
    }
}

// ============================================
// File Sink
// ============================================

/// Writes a decrypted file message into the inbox sink directory and
/// returns the path it landed at.
///
/// # Errors
/// Returns `FileWriteFailed` if the directory cannot be created or the
/// file cannot be written.
pub fn save_file_message(peer_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(INBOX_DIR_NAME);
    std::fs::create_dir_all(&dir).map_err(|e| ClientError::FileWriteFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let path = dir.join(format!("{peer_name}_{}", unix_timestamp_millis()));
    std::fs::write(&path, bytes).map_err(|e| ClientError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(path)
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_file_message_creates_sink() {
        let bytes = b"decrypted file body";
        let path = save_file_message("bob", bytes).unwrap();

        assert!(path.starts_with(std::env::temp_dir().join(INBOX_DIR_NAME)));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("bob_"));
        assert_eq!(std::fs::read(&path).unwrap(), bytes);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_incoming_message_construction() {
        let message = IncomingMessage::new("carol", KEY_REQUEST_NOTICE);
        assert_eq!(message.from, "carol");
        assert_eq!(message.body, "Symmetric key request");
    }
}
