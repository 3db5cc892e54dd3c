// ============================================
// File: crates/messageu-client/src/identity.rs
// ============================================
//! # Persistent Local Identity
//!
//! ## Creation Reason
//! Persists the local identity created at first registration so later
//! sessions resume as the same client.
//!
//! ## File Format (`my.info`)
//! ```text
//! line 1     display name
//! line 2     identity as 32 lowercase hex digits
//! lines 3..N base64 of the PKCS#8 private key, wrapped across lines
//! ```
//!
//! ## Main Functionality
//! - `LocalIdentity`: name + identity + RSA private key, immutable for
//!   the process lifetime once created
//! - `IdentityStore`: load/save against the identity file
//!
//! ## ⚠️ Important Note for Next Developer
//! - A missing file is an ordinary outcome (unregistered client); only
//!   an unreadable or inconsistent file is an error
//! - The write is write-then-close; full atomicity is not required
//!
//! ## Last Modified
//! v0.1.0 - Initial identity store

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::info;
use zeroize::Zeroizing;

use messageu_common::types::ClientId;
use messageu_core::crypto::IdentityKeyPair;

use crate::error::{ClientError, Result};

// ============================================
// Constants
// ============================================

/// Default name of the identity file.
pub const CLIENT_INFO_FILE: &str = "my.info";

/// Width of the base64 key lines written to the identity file.
const KEY_LINE_WIDTH: usize = 64;

// ============================================
// LocalIdentity
// ============================================

/// The local client's registered identity.
///
/// Created at first successful registration; immutable thereafter for
/// the process lifetime.
pub struct LocalIdentity {
    name: String,
    id: ClientId,
    key: IdentityKeyPair,
}

impl LocalIdentity {
    /// Assembles an identity from its parts.
    #[must_use]
    pub fn new(name: String, id: ClientId, key: IdentityKeyPair) -> Self {
        Self { name, id, key }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the server-assigned identity.
    #[must_use]
    pub const fn id(&self) -> ClientId {
        self.id
    }

    /// Returns the RSA identity key pair.
    #[must_use]
    pub const fn key(&self) -> &IdentityKeyPair {
        &self.key
    }
}

impl fmt::Debug for LocalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The key pair redacts itself
        f.debug_struct("LocalIdentity")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

// ============================================
// IdentityStore
// ============================================

/// Load/save access to the identity file.
///
/// # Example
/// ```no_run
/// use messageu_client::identity::IdentityStore;
///
/// let store = IdentityStore::new("my.info");
/// match store.load().unwrap() {
///     Some(identity) => println!("registered as {}", identity.name()),
///     None => println!("not registered yet"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    /// Creates a store over the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the identity, if one has been persisted.
    ///
    /// # Returns
    /// - `Ok(Some(_))` for a well-formed identity file
    /// - `Ok(None)` when the file does not exist (unregistered client)
    ///
    /// # Errors
    /// Returns `ConfigMalformed` for a file that exists but cannot be
    /// parsed into a complete identity.
    pub fn load(&self) -> Result<Option<LocalIdentity>> {
        let origin = self.path.display().to_string();

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClientError::config_malformed(&origin, e.to_string())),
        };

        let mut lines = content.lines();

        let name = lines
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ClientError::config_malformed(&origin, "missing name line"))?;

        let id_line = lines
            .next()
            .map(str::trim)
            .ok_or_else(|| ClientError::config_malformed(&origin, "missing identity line"))?;
        let id = ClientId::from_hex(id_line)
            .map_err(|e| ClientError::config_malformed(&origin, e.to_string()))?;

        // The private key may span any number of lines; decode each and
        // concatenate
        let mut key_der = Zeroizing::new(Vec::new());
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let chunk = BASE64
                .decode(line)
                .map_err(|e| ClientError::config_malformed(&origin, e.to_string()))?;
            key_der.extend_from_slice(&chunk);
        }

        if key_der.is_empty() {
            return Err(ClientError::config_malformed(&origin, "missing private key"));
        }

        let key = IdentityKeyPair::from_der(&key_der)
            .map_err(|e| ClientError::config_malformed(&origin, e.to_string()))?;

        info!(name = %name, "identity loaded");
        Ok(Some(LocalIdentity::new(name.to_string(), id, key)))
    }

    /// Persists an identity, overwriting any previous file.
    ///
    /// # Errors
    /// Returns `PersistenceFailed` on any write error.
    pub fn save(&self, identity: &LocalIdentity) -> Result<()> {
        let key_der = identity
            .key()
            .to_der()
            .map_err(|e| ClientError::persistence_failed(e.to_string()))?;
        let key_base64 = BASE64.encode(&*key_der);

        let mut content = String::new();
        content.push_str(identity.name());
        content.push('\n');
        content.push_str(&identity.id().to_hex());
        content.push('\n');
        for line in key_base64.as_bytes().chunks(KEY_LINE_WIDTH) {
            // chunks of an ASCII string are valid UTF-8
            content.push_str(std::str::from_utf8(line).unwrap_or_default());
            content.push('\n');
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::persistence_failed(e.to_string()))?;
        }

        std::fs::write(&self.path, content)
            .map_err(|e| ClientError::persistence_failed(e.to_string()))?;

        info!(path = %self.path.display(), "identity persisted");
        Ok(())
    }
}

// ============================================
// Tests
// ============================================
