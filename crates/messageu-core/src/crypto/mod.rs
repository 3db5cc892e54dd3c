// ============================================
// File: crates/messageu-core/src/crypto/mod.rs
// ============================================
//! # Cryptography Module
//!
//! ## Creation Reason
//! Centralizes all cryptographic operations for the MessageU client,
//! using audited RustCrypto implementations.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`rsa`]: Identity key pair and peer public keys (RSA-1024, OAEP-SHA1)
//! - [`aes`]: Per-pair symmetric keys (AES-128-CBC, PKCS#7)
//!
//! ## Cryptographic Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Key Exchange (per peer pair)               │
//! │  Alice                                          Bob         │
//! │    │  KeyRequest ─────────────────────────────► │           │
//! │    │ ◄───────── RSA-OAEP(pub_A, aes_key) ────── │           │
//! │    │                                            │           │
//! │    │        both sides now hold aes_key         │           │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Message Bodies                         │
//! │                                                             │
//! │   aes_key + zero IV ──► AES-128-CBC/PKCS#7 ──► ciphertext  │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Protocol-Fixed Parameters
//! The deployed network pins RSA-1024 with public exponent 17, OAEP over
//! SHA-1, AES-128-CBC with an all-zero IV, and a 160-byte DER public-key
//! encoding. All four are wire-compatibility constraints; changing any of
//! them requires a protocol version bump.
//!
//! ## ⚠️ Important Note for Next Developer
//! - ALL implementations use RustCrypto (audited)
//! - NEVER roll your own crypto
//! - ALL symmetric/private key material implements Zeroize
//!
//! ## Last Modified
//! v0.1.0 - Initial crypto implementation

pub mod aes;
pub mod rsa;

// Re-export primary types at module level
pub use aes::SymmetricKey;
pub use rsa::{IdentityKeyPair, PeerPublicKey};

// ============================================
// Constants
// ============================================

/// RSA modulus size in bits.
pub const RSA_KEY_BITS: usize = 1024;

/// RSA public exponent.
///
/// The deployed peers serialize their keys with e = 17, which makes the
/// DER `SubjectPublicKeyInfo` exactly [`PUBLIC_KEY_SIZE`] bytes.
pub const RSA_PUBLIC_EXPONENT: u64 = 17;

/// Size of the serialized RSA public key on the wire, in bytes.
pub const PUBLIC_KEY_SIZE: usize = 160;

/// Size of an RSA-1024 ciphertext block in bytes.
pub const RSA_CIPHERTEXT_SIZE: usize = 128;

/// Maximum plaintext size for RSA-1024 OAEP-SHA1, in bytes.
pub const RSA_MAX_PLAINTEXT_SIZE: usize = 86;

/// Size of an AES-128 key in bytes.
pub const SYMMETRIC_KEY_SIZE: usize = 16;

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;
