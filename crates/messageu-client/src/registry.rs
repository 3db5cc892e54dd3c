// ============================================
// File: crates/messageu-client/src/registry.rs
// ============================================
//! # Peer Registry
//!
//! ## Creation Reason
//! Keeps the in-memory table of peers learned from the relay, together
//! with whatever key material has been established for each.
//!
//! ## Main Functionality
//! - `Peer`: identity, display name, optional public/symmetric keys
//! - `PeerRegistry`: rebuild-on-refresh table with key carry-over
//!
//! ## Key State (per peer)
//! ```text
//!    Unknown ──fetch users──▶ Known
//!    Known ──fetch public key──▶ PubKnown
//!    PubKnown ──send/receive KeySend──▶ Secure
//!    Secure ──text/file──▶ Secure
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - `replace_all` preserves keys already learned for identities that
//!   survive the refresh; discarding them would silently break Secure
//!   pairs on every list refresh
//! - The local identity must never be inserted here
//!
//! ## Last Modified
//! v0.1.0 - Initial registry implementation

use messageu_common::types::ClientId;
use messageu_core::crypto::{PeerPublicKey, SymmetricKey};

use crate::error::{ClientError, Result};

// ============================================
// Peer
// ============================================

/// One peer known to the local client.
#[derive(Debug, Clone)]
pub struct Peer {
    /// Server-assigned identity.
    pub id: ClientId,
    /// Display name from the latest users refresh.
    pub name: String,
    /// RSA public key, present after a successful public-key fetch.
    pub public_key: Option<PeerPublicKey>,
    /// AES key, present once either side completed a key exchange.
    pub symmetric_key: Option<SymmetricKey>,
}

impl Peer {
    fn new(id: ClientId, name: String) -> Self {
        Self {
            id,
            name,
            public_key: None,
            symmetric_key: None,
        }
    }

    /// Returns `true` if text and file bodies can be exchanged.
    #[must_use]
    pub const fn is_secure(&self) -> bool {
        self.symmetric_key.is_some()
    }
}

// ============================================
// PeerRegistry
// ============================================

/// Mapping from identity to peer, rebuilt in full on each users refresh.
///
/// Iteration order is the server's list order; lookups are linear (the
/// list is human-scale).
#[derive(Debug, Clone, Default)]
pub struct PeerRegistry {
    peers: Vec<Peer>,
}

impl PeerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the registry from a fresh server list.
    ///
    /// Keys already learned for an identity that survives the refresh
    /// are carried over; its display name is taken from the new list.
    /// Duplicate identities in the input are collapsed to the first
    /// occurrence.
    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = (ClientId, String)>) {
        let old = std::mem::take(&mut self.peers);

        for (id, name) in entries {
            if self.find(id).is_some() {
                continue;
            }
            let mut peer = Peer::new(id, name);
            if let Some(previous) = old.iter().find(|p| p.id == id) {
                peer.public_key = previous.public_key.clone();
                peer.symmetric_key = previous.symmetric_key.clone();
            }
            self.peers.push(peer);
        }
    }

    /// Finds a peer by identity.
    #[must_use]
    pub fn find(&self, id: ClientId) -> Option<&Peer> {
        self.peers.iter().find(|p| p.id == id)
    }

    /// Finds a peer by display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Peer> {
        self.peers.iter().find(|p| p.name == name)
    }

    /// Installs a public key on a known peer.
    ///
    /// # Errors
    /// Returns `UnknownPeer` if the identity is not in the registry.
    pub fn set_public_key(&mut self, id: ClientId, key: PeerPublicKey) -> Result<()> {
        let peer = self
            .peers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ClientError::unknown_peer(id.to_hex()))?;
        peer.public_key = Some(key);
        Ok(())
    }

    /// Installs a symmetric key on a known peer.
    ///
    /// # Errors
    /// Returns `UnknownPeer` if the identity is not in the registry.
    pub fn set_symmetric_key(&mut self, id: ClientId, key: SymmetricKey) -> Result<()> {
        let peer = self
            .peers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ClientError::unknown_peer(id.to_hex()))?;
        peer.symmetric_key = Some(key);
        Ok(())
    }

    /// Returns all display names, sorted.
    #[must_use]
    pub fn names_sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.peers.iter().map(|p| p.name.clone()).collect();
        names.sort();
        names
    }

    /// Returns the number of known peers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Returns `true` if no peers are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use messageu_core::crypto::SYMMETRIC_KEY_SIZE;

    fn id(byte: u8) -> ClientId {
        ClientId::from([byte; 16])
    }

    fn key() -> SymmetricKey {
        SymmetricKey::from_bytes(&[9u8; SYMMETRIC_KEY_SIZE]).unwrap()
    }

    #[test]
    fn test_replace_all_and_lookups() {
        let mut registry = PeerRegistry::new();
        registry.replace_all([(id(1), "bob".to_string()), (id(2), "carol".to_string())]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find(id(1)).unwrap().name, "bob");
        assert_eq!(registry.find_by_name("carol").unwrap().id, id(2));
        assert!(registry.find(id(3)).is_none());
        assert!(registry.find_by_name("dave").is_none());
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = PeerRegistry::new();
        registry.replace_all([
            (id(1), "carol".to_string()),
            (id(2), "alice".to_string()),
            (id(3), "bob".to_string()),
        ]);

        assert_eq!(registry.names_sorted(), ["alice", "bob", "carol"]);
    }

    #[test]
    fn test_refresh_preserves_learned_keys() {
        let mut registry = PeerRegistry::new();
        registry.replace_all([(id(1), "bob".to_string())]);
        registry.set_symmetric_key(id(1), key()).unwrap();

        // Bob survives the refresh under a new name; a newcomer appears
        registry.replace_all([
            (id(1), "bobby".to_string()),
            (id(2), "carol".to_string()),
        ]);

        let bob = registry.find(id(1)).unwrap();
        assert_eq!(bob.name, "bobby");
        assert!(bob.is_secure());
        assert!(!registry.find(id(2)).unwrap().is_secure());
    }

    #[test]
    fn test_refresh_drops_departed_peers() {
        let mut registry = PeerRegistry::new();
        registry.replace_all([(id(1), "bob".to_string())]);
        registry.set_symmetric_key(id(1), key()).unwrap();

        registry.replace_all([(id(2), "carol".to_string())]);
        assert!(registry.find(id(1)).is_none());

        // A departed peer's keys do not resurrect if the id returns later
        registry.replace_all([(id(1), "bob".to_string())]);
        assert!(!registry.find(id(1)).unwrap().is_secure());
    }

    #[test]
    fn test_duplicate_identities_collapse_to_first() {
        let mut registry = PeerRegistry::new();
        registry.replace_all([(id(1), "bob".to_string()), (id(1), "impostor".to_string())]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find(id(1)).unwrap().name, "bob");
    }

    #[test]
    fn test_key_install_requires_known_peer() {
        let mut registry = PeerRegistry::new();

        let err = registry.set_symmetric_key(id(7), key()).unwrap_err();
        assert!(matches!(err, ClientError::UnknownPeer { .. }));

        registry.replace_all([(id(7), "bob".to_string())]);
        assert!(registry.set_symmetric_key(id(7), key()).is_ok());
        assert!(registry.find(id(7)).unwrap().is_secure());
    }

    #[test]
    fn test_empty_registry() {
        let registry = PeerRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.names_sorted().is_empty());
    }
}
