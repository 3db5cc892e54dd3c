// ============================================
// File: crates/messageu-transport/src/tcp.rs
// ============================================
//! # Blocking TCP Transport
//!
//! ## Creation Reason
//! Implements `StreamTransport` over a real TCP socket: resolve, connect
//! with Nagle disabled, full writes, exact chunked reads, clean teardown.
//!
//! ## Main Functionality
//! - `TcpTransport`: the production transport
//!
//! ## Read Strategy
//! Responses are drained in chunks of at most [`READ_CHUNK_SIZE`] bytes
//! until the caller's buffer is full. The header and the first payload
//! bytes routinely arrive in one chunk; the caller slices, this layer
//! just counts bytes.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Integers on the wire are little-endian REGARDLESS of host byte
//!   order; this layer must never permute bytes (the codec owns all
//!   integer encoding)
//! - No timeouts are configured; operations block indefinitely on a
//!   stalled server by design
//!
//! ## Last Modified
//! v0.1.0 - Initial TCP implementation

use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

use tracing::{debug, trace};

use crate::error::{Result, TransportError};
use crate::traits::StreamTransport;
use crate::READ_CHUNK_SIZE;

// ============================================
// TcpTransport
// ============================================

/// Blocking TCP implementation of [`StreamTransport`].
///
/// # Socket Options
/// - `TCP_NODELAY` on (each exchange is one small packet; coalescing
///   only adds latency)
/// - blocking mode on
///
/// # Example
/// ```no_run
/// use messageu_transport::{StreamTransport, TcpTransport};
///
/// let mut transport = TcpTransport::new();
/// transport.connect("localhost", 1357).unwrap();
/// transport.send_all(b"request bytes").unwrap();
/// let mut header = [0u8; 7];
/// transport.recv_exact(&mut header).unwrap();
/// transport.disconnect();
/// ```
#[derive(Debug, Default)]
pub struct TcpTransport {
    stream: Option<TcpStream>,
}

impl TcpTransport {
    /// Creates a new, unconnected transport.
    #[must_use]
    pub fn new() -> Self {
        Self { stream: None }
    }
}

impl StreamTransport for TcpTransport {
    fn connect(&mut self, host: &str, port: u16) -> Result<()> {
        // Ensure clean state before connecting
        self.disconnect();

        let endpoint = format!("{host}:{port}");
        let addrs = (host, port)
            .to_socket_addrs()
            .map_err(|e| TransportError::connect_failed(&endpoint, e.to_string()))?;

        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect(addr) {
                Ok(stream) => {
                    stream
                        .set_nodelay(true)
                        .map_err(|e| TransportError::io("set TCP_NODELAY", e))?;
                    stream
                        .set_nonblocking(false)
                        .map_err(|e| TransportError::io("set blocking mode", e))?;

                    debug!(endpoint = %endpoint, "connected to relay");
                    self.stream = Some(stream);
                    return Ok(());
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(TransportError::connect_failed(
            &endpoint,
            last_error.map_or_else(|| "no addresses resolved".into(), |e| e.to_string()),
        ))
    }

    fn send_all(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(TransportError::NotConnected)?;
        let result = stream.write_all(bytes);

        if let Err(e) = result {
            // The stream position is unknowable after a short write
            self.disconnect();
            return Err(TransportError::write_failed(e.to_string()));
        }

        trace!(len = bytes.len(), "request sent");
        Ok(())
    }

    fn recv_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(TransportError::NotConnected)?;
        let result = read_exact_chunked(stream, buf);

        match &result {
            Ok(()) => trace!(len = buf.len(), "response bytes received"),
            Err(_) => self.disconnect(),
        }
        result
    }

    fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            // Best effort: the peer may already be gone
            let _ = stream.shutdown(Shutdown::Both);
            debug!("disconnected from relay");
        }
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Fills `buf` from the stream in chunks of at most [`READ_CHUNK_SIZE`]
/// bytes.
fn read_exact_chunked(stream: &mut TcpStream, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        let want = (buf.len() - filled).min(READ_CHUNK_SIZE);
        match stream.read(&mut buf[filled..filled + want]) {
            Ok(0) => return Err(TransportError::peer_closed(buf.len(), filled)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(TransportError::io("receive response", e)),
        }
    }
    Ok(())
}

// ============================================
// Tests
// ============================================
