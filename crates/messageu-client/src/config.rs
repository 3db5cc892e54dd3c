// ============================================
// File: crates/messageu-client/src/config.rs
// ============================================
//! # Relay Endpoint Configuration
//!
//! ## Creation Reason
//! Reads and validates the one-line `server.info` file that names the
//! relay server the client talks to.
//!
//! ## File Format
//! A single line `HOST:PORT`, whitespace trimmed. The host must be an
//! IP literal or the hostname `localhost`; the port an integer in
//! [1, 65535]. Splitting happens on the LAST `:` so IPv6 literals work.
//!
//! ## ⚠️ Important Note for Next Developer
//! - DNS resolution happens at connect time in the transport, not here
//! - Validation failures must name the file; the console prints them
//!
//! ## Last Modified
//! v0.1.0 - Initial endpoint configuration

use std::fmt;
use std::io::ErrorKind;
use std::net::IpAddr;
use std::path::Path;

use tracing::info;

use crate::error::{ClientError, Result};

// ============================================
// Constants
// ============================================

/// Default name of the relay endpoint configuration file.
pub const SERVER_INFO_FILE: &str = "server.info";

// ============================================
// ServerEndpoint
// ============================================

/// Validated relay server endpoint.
///
/// # Example
/// ```
/// use messageu_client::config::ServerEndpoint;
///
/// let endpoint = ServerEndpoint::parse("127.0.0.1:1357", "server.info").unwrap();
/// assert_eq!(endpoint.host(), "127.0.0.1");
/// assert_eq!(endpoint.port(), 1357);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    host: String,
    port: u16,
}

impl ServerEndpoint {
    /// Parses and validates a `HOST:PORT` line.
    ///
    /// `origin` names the configuration source for error messages.
    ///
    /// # Errors
    /// Returns `ConfigMalformed` if the separator is missing, the host
    /// is neither an IP literal nor `localhost`, or the port is not in
    /// [1, 65535].
    pub fn parse(line: &str, origin: &str) -> Result<Self> {
        let line = line.trim();

        let (host, port) = line
            .rsplit_once(':')
            .ok_or_else(|| ClientError::config_malformed(origin, "missing ':' separator"))?;

        if !Self::is_valid_host(host) {
            return Err(ClientError::config_malformed(
                origin,
                format!("invalid host '{host}'"),
            ));
        }

        let port: u16 = port
            .parse()
            .ok()
            .filter(|&p| p > 0)
            .ok_or_else(|| {
                ClientError::config_malformed(origin, format!("invalid port '{port}'"))
            })?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    /// Loads the endpoint from a configuration file.
    ///
    /// # Errors
    /// Returns `ConfigMissing` if the file does not exist and
    /// `ConfigMalformed` if its contents fail validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ClientError::config_missing(&origin)
            } else {
                ClientError::config_malformed(&origin, e.to_string())
            }
        })?;

        let endpoint = Self::parse(&content, &origin)?;
        info!(endpoint = %endpoint, "relay endpoint loaded");
        Ok(endpoint)
    }

    /// Returns the host half (unresolved).
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the validated port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    fn is_valid_host(host: &str) -> bool {
        host.eq_ignore_ascii_case("localhost") || host.parse::<IpAddr>().is_ok()
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// ============================================
// Tests
// ============================================
