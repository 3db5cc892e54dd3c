// ============================================
// File: crates/messageu-core/src/crypto/rsa.rs
// ============================================
//! # RSA Key Types
//!
//! ## Creation Reason
//! Implements the asymmetric tier of the key exchange: the client's
//! long-term identity key pair and the public keys learned from peers.
//!
//! ## Main Functionality
//! - `IdentityKeyPair`: RSA-1024 private key, OAEP-SHA1 decryption,
//!   PKCS#8 DER (de)serialization, 160-byte public wire form
//! - `PeerPublicKey`: encrypt-only handle built from a wire key
//!
//! ## Key Lifecycle
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  IdentityKeyPair (long-term)                               │
//! │  ├─ Generated once at registration                         │
//! │  ├─ Persisted base64-encoded in the identity file          │
//! │  └─ Decrypts incoming KeySend messages                     │
//! │                                                            │
//! │  PeerPublicKey (per peer)                                  │
//! │  ├─ Fetched from the relay (160-byte DER)                  │
//! │  └─ Encrypts the fresh AES key in outgoing KeySend         │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - RSA-1024 and OAEP-SHA1 are protocol-fixed weak choices; the wire
//!   format requires them (see DESIGN.md)
//! - Private keys must NEVER be logged; `Debug` is redacted
//! - Keys are generated with e = 17 so the public DER is 160 bytes
//!
//! ## Last Modified
//! v0.1.0 - Initial RSA key types

use std::fmt;

use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{BigUint, Oaep, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use zeroize::Zeroizing;

use super::{PUBLIC_KEY_SIZE, RSA_KEY_BITS, RSA_PUBLIC_EXPONENT};
use crate::error::{CoreError, Result};

// ============================================
// IdentityKeyPair
// ============================================

/// The client's long-term RSA-1024 identity key pair.
///
/// # Purpose
/// Generated once at registration; its public half travels in the
/// registration request so peers can encrypt symmetric keys to us, and
/// the private half decrypts incoming `KeySend` messages.
///
/// # Security
/// - Serialized private material is wrapped in [`Zeroizing`] buffers
/// - `Debug` never prints key material
///
/// # Example
/// ```
/// use messageu_core::crypto::{IdentityKeyPair, SymmetricKey, PeerPublicKey};
///
/// let identity = IdentityKeyPair::generate().unwrap();
/// let wire = identity.public_key_wire().unwrap();
/// assert_eq!(wire.len(), 160);
///
/// // A peer encrypts a symmetric key to us...
/// let peer_view = PeerPublicKey::from_wire(&wire).unwrap();
/// let key = SymmetricKey::generate();
/// let sealed = peer_view.encrypt(key.as_bytes()).unwrap();
///
/// // ...and we recover it.
/// let opened = identity.decrypt(&sealed).unwrap();
/// assert_eq!(&opened[..], key.as_bytes());
/// ```
pub struct IdentityKeyPair {
    private_key: RsaPrivateKey,
}

impl IdentityKeyPair {
    /// Generates a fresh RSA-1024 key pair with the protocol's exponent.
    ///
    /// # Errors
    /// Returns `KeySetup` if generation fails, or `BadKeyLength` if the
    /// resulting public encoding is not exactly 160 bytes.
    pub fn generate() -> Result<Self> {
        let exponent = BigUint::from(RSA_PUBLIC_EXPONENT);
        let private_key = RsaPrivateKey::new_with_exp(&mut OsRng, RSA_KEY_BITS, &exponent)
            .map_err(|e| CoreError::key_setup(format!("RSA key generation: {e}")))?;

        let pair = Self { private_key };
        // The wire field is fixed width; reject any key that will not fit.
        pair.public_key_wire()?;
        Ok(pair)
    }

    /// Loads a key pair from PKCS#8 DER bytes (the identity-file format).
    ///
    /// # Errors
    /// Returns `KeySetup` if the bytes are not a valid RSA private key.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| CoreError::key_setup(format!("RSA private key parse: {e}")))?;
        Ok(Self { private_key })
    }

    /// Serializes the private key as PKCS#8 DER for persistence.
    ///
    /// The returned buffer zeroizes itself on drop.
    ///
    /// # Errors
    /// Returns `KeySetup` if encoding fails.
    pub fn to_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let document = self
            .private_key
            .to_pkcs8_der()
            .map_err(|e| CoreError::key_setup(format!("RSA private key encode: {e}")))?;
        Ok(Zeroizing::new(document.as_bytes().to_vec()))
    }

    /// Returns the public key in its 160-byte wire form.
    ///
    /// # Errors
    /// Returns `BadKeyLength` if the DER encoding is not exactly 160
    /// bytes (an incompatible exponent or modulus size).
    pub fn public_key_wire(&self) -> Result<[u8; PUBLIC_KEY_SIZE]> {
        let public_key = RsaPublicKey::from(&self.private_key);
        let der = public_key
            .to_public_key_der()
            .map_err(|e| CoreError::key_setup(format!("RSA public key encode: {e}")))?;

        let bytes = der.as_bytes();
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(CoreError::bad_key_length(PUBLIC_KEY_SIZE, bytes.len()));
        }

        let mut wire = [0u8; PUBLIC_KEY_SIZE];
        wire.copy_from_slice(bytes);
        Ok(wire)
    }

    /// Decrypts an RSA-OAEP-SHA1 ciphertext with the private key.
    ///
    /// # Errors
    /// Returns `Decryption` on any failure (wrong key, tampering, or
    /// garbage input); no detail is exposed.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.private_key
            .decrypt(Oaep::new::<Sha1>(), ciphertext)
            .map_err(|_| CoreError::Decryption)
    }
}

impl fmt::Debug for IdentityKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print private key material
        f.debug_struct("IdentityKeyPair").finish_non_exhaustive()
    }
}

// ============================================
// PeerPublicKey
// ============================================

/// Encrypt-only handle for a peer's RSA public key.
///
/// Built from the opaque 160-byte block carried in PublicKey responses
/// and registration requests.
#[derive(Clone, PartialEq)]
pub struct PeerPublicKey {
    public_key: RsaPublicKey,
}

impl PeerPublicKey {
    /// Parses a public key from its 160-byte wire form.
    ///
    /// # Errors
    /// Returns `KeySetup` if the bytes are not a valid DER-encoded RSA
    /// public key.
    pub fn from_wire(wire: &[u8; PUBLIC_KEY_SIZE]) -> Result<Self> {
        let public_key = RsaPublicKey::from_public_key_der(wire)
            .map_err(|e| CoreError::key_setup(format!("RSA public key parse: {e}")))?;
        Ok(Self { public_key })
    }

    /// Encrypts a plaintext to the peer with RSA-OAEP-SHA1.
    ///
    /// # Errors
    /// Returns `Encryption` if the plaintext exceeds the OAEP limit
    /// (86 bytes for RSA-1024) or the operation fails.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.public_key
            .encrypt(&mut OsRng, Oaep::new::<Sha1>(), plaintext)
            .map_err(|e| CoreError::encryption(format!("rsa-oaep: {e}")))
    }
}

impl fmt::Debug for PeerPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerPublicKey").finish_non_exhaustive()
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{RSA_CIPHERTEXT_SIZE, RSA_MAX_PLAINTEXT_SIZE, SYMMETRIC_KEY_SIZE};

    #[test]
    fn test_public_key_wire_is_exactly_160_bytes() {
        let pair = IdentityKeyPair::generate().unwrap();
        let wire = pair.public_key_wire().unwrap();
        assert_eq!(wire.len(), PUBLIC_KEY_SIZE);

        // The encoding must parse back into a usable key
        assert!(PeerPublicKey::from_wire(&wire).is_ok());
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let pair = IdentityKeyPair::generate().unwrap();
        let peer_view = PeerPublicKey::from_wire(&pair.public_key_wire().unwrap()).unwrap();

        // The protocol's real payload: a 16-byte symmetric key
        let plaintext = [0x42u8; SYMMETRIC_KEY_SIZE];
        let ciphertext = peer_view.encrypt(&plaintext).unwrap();
        assert_eq!(ciphertext.len(), RSA_CIPHERTEXT_SIZE);

        let recovered = pair.decrypt(&ciphertext).unwrap();
        assert_eq!(&recovered[..], &plaintext[..]);
    }

    #[test]
    fn test_encrypt_at_oaep_limit() {
        let pair = IdentityKeyPair::generate().unwrap();
        let peer_view = PeerPublicKey::from_wire(&pair.public_key_wire().unwrap()).unwrap();

        let max = vec![0xA5u8; RSA_MAX_PLAINTEXT_SIZE];
        let ciphertext = peer_view.encrypt(&max).unwrap();
        assert_eq!(pair.decrypt(&ciphertext).unwrap(), max);

        let over = vec![0xA5u8; RSA_MAX_PLAINTEXT_SIZE + 1];
        assert!(peer_view.encrypt(&over).is_err());
    }

    #[test]
    fn test_private_key_der_roundtrip() {
        let pair = IdentityKeyPair::generate().unwrap();
        let der = pair.to_der().unwrap();

        let restored = IdentityKeyPair::from_der(&der).unwrap();
        assert_eq!(
            pair.public_key_wire().unwrap(),
            restored.public_key_wire().unwrap()
        );

        // The restored key must decrypt what the original's public half sealed
        let peer_view = PeerPublicKey::from_wire(&pair.public_key_wire().unwrap()).unwrap();
        let ciphertext = peer_view.encrypt(b"still mine").unwrap();
        assert_eq!(restored.decrypt(&ciphertext).unwrap(), b"still mine");
    }

    #[test]
    fn test_decrypt_garbage_fails() {
        let pair = IdentityKeyPair::generate().unwrap();

        let err = pair.decrypt(&[0u8; RSA_CIPHERTEXT_SIZE]).unwrap_err();
        assert!(matches!(err, CoreError::Decryption));

        assert!(pair.decrypt(b"too short").is_err());
    }

    #[test]
    fn test_decrypt_with_wrong_key_fails() {
        let alice = IdentityKeyPair::generate().unwrap();
        let bob = IdentityKeyPair::generate().unwrap();
        let to_alice = PeerPublicKey::from_wire(&alice.public_key_wire().unwrap()).unwrap();

        let ciphertext = to_alice.encrypt(b"for alice only").unwrap();
        assert!(bob.decrypt(&ciphertext).is_err());
        assert!(alice.decrypt(&ciphertext).is_ok());
    }

    #[test]
    fn test_from_der_rejects_garbage() {
        assert!(IdentityKeyPair::from_der(&[0u8; 64]).is_err());
        assert!(PeerPublicKey::from_wire(&[0u8; PUBLIC_KEY_SIZE]).is_err());
    }
}
