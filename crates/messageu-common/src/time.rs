// ============================================
// File: crates/messageu-common/src/time.rs
// ============================================
//! # Time Utilities
//!
//! ## Creation Reason
//! Provides the Unix-millisecond timestamp used to name decrypted file
//! messages written to the inbox sink directory.
//!
//! ## Main Functionality
//! - `unix_timestamp_millis`: milliseconds since the Unix epoch
//!
//! ## ⚠️ Important Note for Next Developer
//! - Inbox file names embed this value; keep it monotone-enough for
//!   distinct names (collisions within one millisecond overwrite)
//!
//! ## Last Modified
//! v0.1.0 - Initial time utilities

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current Unix timestamp in milliseconds.
///
/// Clocks before the epoch are clamped to zero rather than panicking.
#[must_use]
pub fn unix_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ============================================
// Tests
// ============================================
