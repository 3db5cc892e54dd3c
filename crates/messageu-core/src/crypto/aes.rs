// ============================================
// File: crates/messageu-core/src/crypto/aes.rs
// ============================================
//! # Symmetric Key Type
//!
//! ## Creation Reason
//! Implements the symmetric tier of the key exchange: the per-pair
//! AES-128 key that encrypts text and file message bodies.
//!
//! ## Main Functionality
//! - `SymmetricKey`: 16-byte key, zeroized on drop
//! - AES-128-CBC encryption/decryption with PKCS#7 padding
//!
//! ## IV Handling
//! The protocol pins an all-zero IV: deployed peers derive no per-message
//! IV and the wire carries none. Encryption is therefore deterministic
//! for a given key and plaintext.
//!
//! ## ⚠️ Important Note for Next Developer
//! - The zero IV is a wire-compatibility constraint, not a free choice;
//!   a randomized IV requires a protocol version bump
//! - Key material is zeroized on drop and never printed
//!
//! ## Last Modified
//! v0.1.0 - Initial symmetric key implementation

use std::fmt;

use aes::Aes128;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{AES_BLOCK_SIZE, SYMMETRIC_KEY_SIZE};
use crate::error::{CoreError, Result};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

// Protocol-fixed IV; the wire carries none.
const ZERO_IV: [u8; AES_BLOCK_SIZE] = [0u8; AES_BLOCK_SIZE];

// ============================================
// SymmetricKey
// ============================================

/// AES-128 key shared between one pair of clients.
///
/// # Lifecycle
/// Generated by whichever side answers a `KeyRequest`, sealed with the
/// peer's RSA public key for transport, and installed on both peers for
/// the rest of the process lifetime.
///
/// # Security
/// - Zeroed on drop
/// - `Debug` never prints key material
///
/// # Example
/// ```
/// use messageu_core::crypto::SymmetricKey;
///
/// let key = SymmetricKey::generate();
/// let ciphertext = key.encrypt(b"hello");
/// assert_eq!(key.decrypt(&ciphertext).unwrap(), b"hello");
/// ```
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; SYMMETRIC_KEY_SIZE]);

impl SymmetricKey {
    /// Generates a fresh random key from the OS RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut key = [0u8; SYMMETRIC_KEY_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut key);
        Self(key)
    }

    /// Creates a key from raw bytes.
    ///
    /// # Errors
    /// Returns `BadKeyLength` if the slice is not exactly 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SYMMETRIC_KEY_SIZE {
            return Err(CoreError::bad_key_length(SYMMETRIC_KEY_SIZE, bytes.len()));
        }
        let mut key = [0u8; SYMMETRIC_KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    /// Returns the raw key bytes.
    ///
    /// # Security Warning
    /// Handle the returned reference carefully; the only legitimate
    /// consumer is the RSA seal in an outgoing `KeySend`.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_SIZE] {
        &self.0
    }

    /// Encrypts a plaintext with AES-128-CBC / PKCS#7.
    ///
    /// The output length is the plaintext length rounded up to the next
    /// whole block (a full padding block for block-aligned input).
    #[must_use]
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        Aes128CbcEnc::new(&self.0.into(), &ZERO_IV.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
    }

    /// Decrypts an AES-128-CBC / PKCS#7 ciphertext.
    ///
    /// # Errors
    /// Returns `Decryption` if the ciphertext is not a whole number of
    /// blocks or the padding does not verify (wrong key or tampering).
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_SIZE != 0 {
            return Err(CoreError::Decryption);
        }
        Aes128CbcDec::new(&self.0.into(), &ZERO_IV.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CoreError::Decryption)
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material
        write!(f, "SymmetricKey([REDACTED])")
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key = SymmetricKey::generate();
        let plaintext = b"Hello, World! This is a test message.";

        let ciphertext = key.encrypt(plaintext);
        // PKCS#7 always pads: output is the next whole block up
        assert_eq!(ciphertext.len(), (plaintext.len() / 16 + 1) * 16);

        let decrypted = key.decrypt(&ciphertext).unwrap();
        assert_eq!(&decrypted[..], plaintext);
    }

    #[test]
    fn test_roundtrip_sizes_up_to_a_mebibyte() {
        let key = SymmetricKey::generate();
        for size in [0usize, 1, 15, 16, 17, 1024, 1 << 20] {
            let plaintext = vec![0x5Au8; size];
            let ciphertext = key.encrypt(&plaintext);
            assert_eq!(ciphertext.len() % AES_BLOCK_SIZE, 0);
            assert_eq!(key.decrypt(&ciphertext).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_block_aligned_input_gets_full_padding_block() {
        let key = SymmetricKey::generate();
        let plaintext = [0u8; 32];
        assert_eq!(key.encrypt(&plaintext).len(), 48);
    }

    #[test]
    fn test_decrypt_with_wrong_key_fails() {
        let key1 = SymmetricKey::generate();
        let key2 = SymmetricKey::generate();

        let ciphertext = key1.encrypt(b"secret");
        // Wrong key: padding check fails (CBC has no authentication, so
        // this is best-effort, but a random key failing is overwhelming)
        assert!(key2.decrypt(&ciphertext).is_err() || key2.decrypt(&ciphertext).unwrap() != b"secret");
    }

    #[test]
    fn test_decrypt_rejects_partial_blocks() {
        let key = SymmetricKey::generate();
        assert!(matches!(key.decrypt(b""), Err(CoreError::Decryption)));
        assert!(matches!(key.decrypt(&[0u8; 15]), Err(CoreError::Decryption)));
        assert!(matches!(key.decrypt(&[0u8; 17]), Err(CoreError::Decryption)));
    }

    #[test]
    fn test_zero_iv_is_deterministic() {
        // The protocol's fixed IV means identical inputs produce identical
        // ciphertexts; peers rely on this layout, tests pin it.
        let key = SymmetricKey::from_bytes(&[7u8; SYMMETRIC_KEY_SIZE]).unwrap();
        assert_eq!(key.encrypt(b"same input"), key.encrypt(b"same input"));
    }

    #[test]
    fn test_from_bytes_length_check() {
        assert!(SymmetricKey::from_bytes(&[0u8; 16]).is_ok());
        assert!(matches!(
            SymmetricKey::from_bytes(&[0u8; 15]),
            Err(CoreError::BadKeyLength {
                expected: 16,
                actual: 15
            })
        ));
        assert!(SymmetricKey::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = SymmetricKey::generate();
        let debug = format!("{key:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("0x"));
    }
}
