// ============================================
// File: crates/messageu-core/src/protocol/version.rs
// ============================================
//! # Protocol Versioning
//!
//! ## Creation Reason
//! Pins the protocol version stamped into every request header so the
//! relay can reject clients it does not understand.
//!
//! ## Versioning Strategy
//! - Single byte version number (0-255)
//! - Increment for ANY breaking change
//!
//! ## Version History
//! | Version | Description |
//! |---------|-------------|
//! | 2       | Current deployed protocol (RSA-1024 + AES-128-CBC) |
//!
//! ## ⚠️ Important Note for Next Developer
//! - ALWAYS increment the version for wire format changes
//! - A version bump is the only sanctioned path to randomized IVs or
//!   larger RSA keys (see DESIGN.md)
//!
//! ## Last Modified
//! v0.1.0 - Initial version definitions

use std::fmt;

// ============================================
// Constants
// ============================================

/// Current protocol version, stamped into every request header.
pub const PROTOCOL_VERSION: u8 = 2;

// ============================================
// ProtocolVersion
// ============================================

/// Protocol version identifier.
///
/// # Example
/// ```
/// use messageu_core::protocol::ProtocolVersion;
///
/// let version = ProtocolVersion::current();
/// assert!(version.is_supported());
///
/// let old = ProtocolVersion::new(1);
/// assert!(!old.is_supported());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion(u8);

impl ProtocolVersion {
    /// Creates a new protocol version.
    #[must_use]
    pub const fn new(version: u8) -> Self {
        Self(version)
    }

    /// Returns the current protocol version.
    #[must_use]
    pub const fn current() -> Self {
        Self(PROTOCOL_VERSION)
    }

    /// Returns the raw version number.
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Checks if this version is supported by the current implementation.
    ///
    /// The deployed server speaks exactly one version, so support is an
    /// exact match.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.0 == PROTOCOL_VERSION
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u8> for ProtocolVersion {
    fn from(version: u8) -> Self {
        Self(version)
    }
}

impl From<ProtocolVersion> for u8 {
    fn from(version: ProtocolVersion) -> Self {
        version.0
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version() {
        let version = ProtocolVersion::current();
        assert_eq!(version.as_u8(), PROTOCOL_VERSION);
        assert!(version.is_supported());
    }

    #[test]
    fn test_version_support_check() {
        assert!(!ProtocolVersion::new(0).is_supported());
        assert!(!ProtocolVersion::new(1).is_supported());
        assert!(ProtocolVersion::new(2).is_supported());
        assert!(!ProtocolVersion::new(3).is_supported());
    }

    #[test]
    fn test_version_display() {
        assert_eq!(ProtocolVersion::current().to_string(), "v2");
    }
}
