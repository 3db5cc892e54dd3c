// ============================================
// File: crates/messageu-client/src/client.rs
// ============================================
//! # Messaging Client Pipeline
//!
//! ## Creation Reason
//! Orchestrates the six client operations - register, fetch users, fetch
//! public key, send message, fetch pending, load identity - on top of the
//! codec, crypto, transport, and stores.
//!
//! ## Main Functionality
//! - `MessagingClient`: single owner of transport, registry, and stores
//! - Consumer-facing boolean API with an error buffer for diagnostics
//!
//! ## Exchange Shape
//! Every operation is one connection: connect, send the request, read the
//! 7-byte response header, validate it, read exactly the declared payload,
//! disconnect. Validation happens before the payload read, so a response
//! that declares the wrong size fails as a framing error, not a dead read.
//!
//! ## Peer State Machine (per peer)
//! ```text
//!    Unknown ──FetchUsers──▶ Known
//!    Known ──FetchPublicKey──▶ PubKnown
//!    PubKnown ──Send/Receive KeySend──▶ Secure
//!    Secure ──Text/File──▶ Secure
//! ```
//! Skipping a state is rejected locally with a precise error; no request
//! is sent.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Per-record inbox failures append an error line and skip the record;
//!   the remaining records are still delivered
//! - The error buffer is cleared at the start of every operation; the
//!   consumer reads it after a failure
//!
//! ## Last Modified
//! v0.1.0 - Initial pipeline implementation

use std::path::PathBuf;

use tracing::{info, warn};

use messageu_common::error::CommonError;
use messageu_common::types::ClientId;
use messageu_core::crypto::{IdentityKeyPair, PeerPublicKey, SymmetricKey};
use messageu_core::error::CoreError;
use messageu_core::protocol::{codec, MessageKind, ResponseCode, RESPONSE_HEADER_SIZE};
use messageu_transport::error::TransportError;
use messageu_transport::{StreamTransport, TcpTransport};

use crate::config::{ServerEndpoint, SERVER_INFO_FILE};
use crate::error::{ClientError, Result};
use crate::identity::{IdentityStore, LocalIdentity, CLIENT_INFO_FILE};
use crate::inbox::{self, IncomingMessage, KEY_RECEIVED_NOTICE, KEY_REQUEST_NOTICE};
use crate::registry::PeerRegistry;

// ============================================
// ErrorBuffer
// ============================================

/// Append-only diagnostics buffer the consumer reads after a failed
/// operation. Cleared at the start of every operation.
#[derive(Debug, Default)]
struct ErrorBuffer {
    text: String,
}

impl ErrorBuffer {
    fn clear(&mut self) {
        self.text.clear();
    }

    fn push(&mut self, line: impl AsRef<str>) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line.as_ref());
    }

    fn as_str(&self) -> &str {
        &self.text
    }
}

// ============================================
// MessagingClient
// ============================================

/// The client pipeline: single owner of the transport, the peer
/// registry, the identity store, and the endpoint configuration.
///
/// All operations are synchronous and execute to completion; the
/// consumer (a terminal UI) drives them one at a time.
///
/// # Example
/// ```no_run
/// use messageu_client::MessagingClient;
/// use messageu_core::protocol::MessageKind;
///
/// let mut client = MessagingClient::new();
/// if !client.prepare() {
///     eprintln!("{}", client.last_error());
///     return;
/// }
/// if client.fetch_users() {
///     for name in client.users_sorted() {
///         println!("{name}");
///     }
/// }
/// client.send_message("bob", MessageKind::KeyRequest, None);
/// ```
pub struct MessagingClient<T: StreamTransport = TcpTransport> {
    transport: T,
    endpoint: Option<ServerEndpoint>,
    server_info_path: PathBuf,
    store: IdentityStore,
    identity: Option<LocalIdentity>,
    registry: PeerRegistry,
    errors: ErrorBuffer,
}

impl MessagingClient<TcpTransport> {
    /// Creates a client over TCP with the default configuration file
    /// names (`server.info`, `my.info`) in the working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_paths(SERVER_INFO_FILE, CLIENT_INFO_FILE)
    }

    /// Creates a client over TCP with explicit configuration paths.
    pub fn with_paths(
        server_info: impl Into<PathBuf>,
        client_info: impl Into<PathBuf>,
    ) -> Self {
        Self::with_transport(TcpTransport::new(), server_info, client_info)
    }
}

impl Default for MessagingClient<TcpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StreamTransport> MessagingClient<T> {
    /// Creates a client over an arbitrary transport (tests use the mock).
    pub fn with_transport(
        transport: T,
        server_info: impl Into<PathBuf>,
        client_info: impl Into<PathBuf>,
    ) -> Self {
        Self {
            transport,
            endpoint: None,
            server_info_path: server_info.into(),
            store: IdentityStore::new(client_info),
            identity: None,
            registry: PeerRegistry::new(),
            errors: ErrorBuffer::default(),
        }
    }

    // ========================================
    // Consumer-Facing API
    // ========================================

    /// Loads the relay endpoint and, if present, the persisted identity.
    ///
    /// A missing identity file is an ordinary outcome (the client is
    /// simply unregistered); a missing or malformed `server.info` fails.
    pub fn prepare(&mut self) -> bool {
        self.errors.clear();
        match self.try_prepare() {
            Ok(()) => true,
            Err(e) => self.fail("prepare", &e),
        }
    }

    /// Registers a new client under `name`.
    pub fn register(&mut self, name: &str) -> bool {
        self.errors.clear();
        match self.try_register(name) {
            Ok(()) => true,
            Err(e) => self.fail("register", &e),
        }
    }

    /// Replaces the peer registry with the server's current client list.
    pub fn fetch_users(&mut self) -> bool {
        self.errors.clear();
        match self.try_fetch_users() {
            Ok(()) => true,
            Err(e) => self.fail("fetch_users", &e),
        }
    }

    /// Returns the known peer names, sorted.
    #[must_use]
    pub fn users_sorted(&self) -> Vec<String> {
        self.registry.names_sorted()
    }

    /// Fetches and installs `name`'s public key.
    pub fn fetch_public_key(&mut self, name: &str) -> bool {
        self.errors.clear();
        match self.try_fetch_public_key(name) {
            Ok(()) => true,
            Err(e) => self.fail("fetch_public_key", &e),
        }
    }

    /// Sends a message of `kind` to `name`.
    ///
    /// `data` carries the text body for [`MessageKind::Text`] and the
    /// file path for [`MessageKind::File`]; key-exchange kinds take none.
    pub fn send_message(&mut self, name: &str, kind: MessageKind, data: Option<&str>) -> bool {
        self.errors.clear();
        match self.try_send_message(name, kind, data) {
            Ok(_message_id) => true,
            Err(e) => self.fail("send_message", &e),
        }
    }

    /// Fetches pending messages, in server order.
    ///
    /// Per-record failures are non-fatal: the record is skipped, an
    /// error line is appended, and the remaining records are delivered.
    /// `None` means the fetch itself failed.
    pub fn fetch_pending(&mut self) -> Option<Vec<IncomingMessage>> {
        self.errors.clear();
        match self.try_fetch_pending() {
            Ok(messages) => Some(messages),
            Err(e) => {
                self.fail("fetch_pending", &e);
                None
            }
        }
    }

    /// Returns the diagnostics deposited by the last failed operation.
    #[must_use]
    pub fn last_error(&self) -> &str {
        self.errors.as_str()
    }

    /// Returns the local display name, or an empty string when
    /// unregistered.
    #[must_use]
    pub fn self_name(&self) -> &str {
        self.identity.as_ref().map_or("", LocalIdentity::name)
    }

    /// Returns `true` once a local identity is loaded or registered.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.identity.is_some()
    }

    // ========================================
    // Operations
    // ========================================

    fn try_prepare(&mut self) -> Result<()> {
        self.endpoint = Some(ServerEndpoint::load(&self.server_info_path)?);
        self.identity = self.store.load()?;
        Ok(())
    }

    fn try_register(&mut self, name: &str) -> Result<()> {
        if let Some(identity) = &self.identity {
            return Err(ClientError::AlreadyRegistered {
                name: identity.name().to_string(),
            });
        }
        validate_name(name)?;

        let key = IdentityKeyPair::generate()?;
        let public_key = key.public_key_wire()?;
        let request = codec::encode_register(name, &public_key)?;

        let payload = self.exchange(&request, ResponseCode::Registered)?;
        let id = codec::decode_registered(&payload)?;

        let identity = LocalIdentity::new(name.to_string(), id, key);
        self.store.save(&identity)?;
        self.identity = Some(identity);

        info!(name, id = %id, "registered");
        Ok(())
    }

    fn try_fetch_users(&mut self) -> Result<()> {
        let my_id = self.local_id()?;
        let request = codec::encode_clients_list(my_id);

        let payload = self.exchange(&request, ResponseCode::Users)?;
        let users = codec::decode_users(&payload)?;

        let count = users.len();
        // The local identity is never registry material
        self.registry.replace_all(
            users
                .into_iter()
                .filter(|user| user.id != my_id)
                .map(|user| (user.id, user.name)),
        );

        info!(count, "user list refreshed");
        Ok(())
    }

    fn try_fetch_public_key(&mut self, name: &str) -> Result<()> {
        let my_id = self.local_id()?;
        if name == self.self_name() {
            return Err(ClientError::SelfTarget {
                operation: "a public key request".into(),
            });
        }

        let target = self
            .registry
            .find_by_name(name)
            .ok_or_else(|| ClientError::unknown_peer(name))?
            .id;

        let request = codec::encode_public_key_request(my_id, target);
        let payload = self.exchange(&request, ResponseCode::PublicKey)?;
        let record = codec::decode_public_key(&payload)?;

        if record.id != target {
            return Err(ClientError::response_mismatch(
                "public key response names a different identity",
            ));
        }

        let key = PeerPublicKey::from_wire(&record.public_key)?;
        self.registry.set_public_key(target, key)?;

        info!(peer = name, "public key installed");
        Ok(())
    }

    fn try_send_message(
        &mut self,
        name: &str,
        kind: MessageKind,
        data: Option<&str>,
    ) -> Result<u32> {
        let my_id = self.local_id()?;
        if name == self.self_name() {
            return Err(ClientError::SelfTarget {
                operation: kind.label().into(),
            });
        }

        let (dest, public_key, symmetric_key) = {
            let peer = self
                .registry
                .find_by_name(name)
                .ok_or_else(|| ClientError::unknown_peer(name))?;
            (peer.id, peer.public_key.clone(), peer.symmetric_key.clone())
        };

        let content = match kind {
            MessageKind::KeyRequest => Vec::new(),
            MessageKind::KeySend => {
                let public_key = public_key
                    .ok_or_else(|| ClientError::precondition_missing(name, "Public key"))?;

                // Install the fresh key locally before transmission; both
                // directions of the pair use this one key from now on
                let fresh = SymmetricKey::generate();
                self.registry.set_symmetric_key(dest, fresh.clone())?;
                public_key.encrypt(fresh.as_bytes())?
            }
            MessageKind::Text | MessageKind::File => {
                let data = data.filter(|d| !d.is_empty()).ok_or_else(|| {
                    ClientError::Common(CommonError::invalid_input(
                        "content",
                        "no content provided for message",
                    ))
                })?;
                let symmetric_key = symmetric_key
                    .ok_or_else(|| ClientError::precondition_missing(name, "Symmetric key"))?;

                if kind == MessageKind::File {
                    let bytes = std::fs::read(data).map_err(|_| ClientError::FileNotFound {
                        path: data.to_string(),
                    })?;
                    symmetric_key.encrypt(&bytes)
                } else {
                    symmetric_key.encrypt(data.as_bytes())
                }
            }
        };

        let request = codec::encode_send_message(my_id, dest, kind, &content)?;
        let payload = self.exchange(&request, ResponseCode::MessageSent)?;
        let ack = codec::decode_message_sent(&payload)?;

        if ack.dest != dest {
            return Err(ClientError::response_mismatch(
                "message ack names a different destination",
            ));
        }

        info!(peer = name, message_id = ack.message_id, kind = kind.label(), "message accepted");
        Ok(ack.message_id)
    }

    fn try_fetch_pending(&mut self) -> Result<Vec<IncomingMessage>> {
        let my_id = self.local_id()?;
        let request = codec::encode_pending_request(my_id);

        let payload = self.exchange(&request, ResponseCode::Pending)?;
        let records = codec::decode_pending(&payload)?;

        let mut messages = Vec::new();
        for record in records {
            let known_sender = self.registry.find(record.from).map(|p| p.name.clone());
            let sender = known_sender
                .unwrap_or_else(|| format!("Unknown client: {}", record.from.to_hex()));

            match record.kind() {
                None => {
                    self.skip_record(
                        record.message_id,
                        &sender,
                        format!("unknown message type {}", record.kind),
                    );
                }
                Some(MessageKind::KeyRequest) => {
                    messages.push(IncomingMessage::new(sender, KEY_REQUEST_NOTICE));
                }
                Some(MessageKind::KeySend) => {
                    let decrypted = match &self.identity {
                        Some(identity) => identity.key().decrypt(&record.content),
                        None => Err(CoreError::Decryption),
                    };
                    let key_bytes = match decrypted {
                        Ok(bytes) => bytes,
                        Err(e) => {
                            self.skip_record(record.message_id, &sender, e.to_string());
                            continue;
                        }
                    };
                    let key = match SymmetricKey::from_bytes(&key_bytes) {
                        Ok(key) => key,
                        Err(e) => {
                            self.skip_record(record.message_id, &sender, e.to_string());
                            continue;
                        }
                    };
                    if let Err(e) = self.registry.set_symmetric_key(record.from, key) {
                        self.skip_record(record.message_id, &sender, e.to_string());
                        continue;
                    }
                    messages.push(IncomingMessage::new(sender, KEY_RECEIVED_NOTICE));
                }
                Some(MessageKind::Text | MessageKind::File) => {
                    let key = self
                        .registry
                        .find(record.from)
                        .and_then(|p| p.symmetric_key.clone());
                    let Some(key) = key else {
                        self.skip_record(record.message_id, &sender, "Symmetric key not available");
                        continue;
                    };
                    let body = match key.decrypt(&record.content) {
                        Ok(body) => body,
                        Err(e) => {
                            self.skip_record(record.message_id, &sender, e.to_string());
                            continue;
                        }
                    };

                    if record.kind() == Some(MessageKind::File) {
                        match inbox::save_file_message(&sender, &body) {
                            Ok(path) => messages
                                .push(IncomingMessage::new(sender, path.display().to_string())),
                            Err(e) => {
                                self.skip_record(record.message_id, &sender, e.to_string());
                            }
                        }
                    } else {
                        messages.push(IncomingMessage::new(
                            sender,
                            String::from_utf8_lossy(&body).into_owned(),
                        ));
                    }
                }
            }
        }

        info!(delivered = messages.len(), "pending messages fetched");
        Ok(messages)
    }

    // ========================================
    // Exchange Plumbing
    // ========================================

    /// One complete request/response exchange: connect, send, read and
    /// validate the header, read exactly the declared payload, disconnect.
    ///
    /// The connection is released on every exit path.
    fn exchange(&mut self, request: &[u8], expected: ResponseCode) -> Result<Vec<u8>> {
        let (host, port) = {
            let endpoint = self.endpoint.as_ref().ok_or_else(|| {
                ClientError::config_missing(self.server_info_path.display().to_string())
            })?;
            (endpoint.host().to_string(), endpoint.port())
        };

        self.transport.connect(&host, port)?;
        let outcome = self.exchange_on_open_connection(request, expected);
        self.transport.disconnect();
        outcome
    }

    fn exchange_on_open_connection(
        &mut self,
        request: &[u8],
        expected: ResponseCode,
    ) -> Result<Vec<u8>> {
        self.transport.send_all(request)?;

        let mut head = [0u8; RESPONSE_HEADER_SIZE];
        self.transport.recv_exact(&mut head)?;
        let header = codec::decode_response_header(&head)?;
        codec::validate_response(&header, expected)?;

        let mut payload = vec![0u8; header.payload_size as usize];
        if !payload.is_empty() {
            self.transport.recv_exact(&mut payload).map_err(|e| match e {
                // The header promised more than the stream delivered
                TransportError::PeerClosed { expected, received } => {
                    ClientError::from(CoreError::truncated(expected, received))
                }
                other => other.into(),
            })?;
        }
        Ok(payload)
    }

    // ========================================
    // Helpers
    // ========================================

    fn local_id(&self) -> Result<ClientId> {
        self.identity
            .as_ref()
            .map(LocalIdentity::id)
            .ok_or(ClientError::IdentityNotRegistered)
    }

    fn fail(&mut self, operation: &str, error: &ClientError) -> bool {
        warn!(operation, error = %error, "operation failed");
        self.errors.push(error.to_string());
        false
    }

    fn skip_record(&mut self, message_id: u32, sender: &str, reason: impl AsRef<str>) {
        let reason = reason.as_ref();
        warn!(message_id, sender, reason, "skipping inbox record");
        self.errors
            .push(format!("Message #{message_id} from {sender}: {reason}"));
    }
}

/// Validates a display name: non-empty, at most 254 bytes, and
/// alphanumeric throughout.
fn validate_name(name: &str) -> Result<()> {
    use messageu_core::protocol::MAX_NAME_SIZE;

    if name.is_empty() {
        return Err(ClientError::invalid_name("name cannot be empty"));
    }
    if name.len() > MAX_NAME_SIZE {
        return Err(ClientError::invalid_name(format!(
            "name exceeds {MAX_NAME_SIZE} bytes"
        )));
    }
    if !name.chars().all(char::is_alphanumeric) {
        return Err(ClientError::invalid_name("name must be alphanumeric"));
    }
    Ok(())
}

// ============================================
// Tests
// ============================================
