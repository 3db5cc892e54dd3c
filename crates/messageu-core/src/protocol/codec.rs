// ============================================
// File: crates/messageu-core/src/protocol/codec.rs
// ============================================
//! # Protocol Codec
//!
//! ## Creation Reason
//! Provides binary serialization and deserialization for protocol
//! messages, enabling efficient wire-format encoding.
//!
//! ## Main Functionality
//! - `encode_*`: build complete request packets (header + payload)
//! - `decode_*`: parse response headers and payloads into typed records
//! - `validate_response`: the header validation contract
//!
//! ## Wire Format
//! All multi-byte integers are little-endian. Raw byte fields (identities,
//! keys, ciphertext) are copied verbatim and never byte-swapped.
//!
//! ## Parsing Strategy
//! 1. Check buffer length against the fixed header size
//! 2. Read typed header fields
//! 3. Validate code and declared payload size
//! 4. Parse payload records, checking every record boundary
//!
//! ## ⚠️ Important Note for Next Developer
//! - Always validate buffer lengths before reading
//! - Use checked arithmetic on sizes taken from the wire
//! - Unknown pending-message kinds are NOT a parse error; the pipeline
//!   skips them per record
//!
//! ## Last Modified
//! v0.1.0 - Initial codec implementation

use bytes::{Buf, BufMut, BytesMut};

use messageu_common::types::{ClientId, CLIENT_ID_SIZE};

use crate::crypto::PUBLIC_KEY_SIZE;
use crate::error::{CoreError, Result};
use crate::protocol::messages::{
    MessageKind, MessageSentAck, PendingRecord, PublicKeyRecord, RequestCode, RequestHeader,
    ResponseCode, ResponseHeader, UserRecord, MAX_NAME_SIZE, NAME_FIELD_SIZE,
    PENDING_RECORD_HEADER_SIZE, REGISTER_PAYLOAD_SIZE, REQUEST_HEADER_SIZE, RESPONSE_HEADER_SIZE,
    SEND_MESSAGE_PREFIX_SIZE, USER_RECORD_SIZE,
};

// ============================================
// Request Header
// ============================================

/// Encodes a request header into a fresh buffer.
#[must_use]
pub fn encode_request_header(header: &RequestHeader) -> BytesMut {
    let mut buf = BytesMut::with_capacity(REQUEST_HEADER_SIZE);
    put_request_header(&mut buf, header);
    buf
}

fn put_request_header(buf: &mut BytesMut, header: &RequestHeader) {
    buf.put_slice(header.client_id.as_bytes());
    buf.put_u8(header.version);
    buf.put_u16_le(header.code.as_u16());
    buf.put_u32_le(header.payload_size);
}

/// Decodes a request header from bytes.
///
/// # Errors
/// Returns `MalformedHeader` if the buffer is too short or the code is
/// not a known request code.
pub fn decode_request_header(buf: &[u8]) -> Result<RequestHeader> {
    if buf.len() < REQUEST_HEADER_SIZE {
        return Err(CoreError::malformed_header(format!(
            "request header needs {REQUEST_HEADER_SIZE} bytes, got {}",
            buf.len()
        )));
    }

    let mut buf = buf;
    let mut id = [0u8; CLIENT_ID_SIZE];
    buf.copy_to_slice(&mut id);
    let version = buf.get_u8();
    let raw_code = buf.get_u16_le();
    let payload_size = buf.get_u32_le();

    let code = RequestCode::from_u16(raw_code)
        .ok_or_else(|| CoreError::malformed_header(format!("unknown request code {raw_code}")))?;

    Ok(RequestHeader {
        client_id: ClientId::from(id),
        version,
        code,
        payload_size,
    })
}

// ============================================
// Request Encoders
// ============================================

/// Encodes a 600 Register request.
///
/// The identity field is transmitted as zeros; the payload is the
/// zero-padded, null-terminated name followed by the 160-byte public key.
///
/// # Errors
/// Returns an error if the name does not fit the wire field.
pub fn encode_register(name: &str, public_key: &[u8; PUBLIC_KEY_SIZE]) -> Result<BytesMut> {
    if name.len() > MAX_NAME_SIZE {
        return Err(
            messageu_common::CommonError::invalid_length(MAX_NAME_SIZE, name.len()).into(),
        );
    }

    let header = RequestHeader::new(
        ClientId::zero(),
        RequestCode::Register,
        REGISTER_PAYLOAD_SIZE as u32,
    );

    let mut buf = BytesMut::with_capacity(REQUEST_HEADER_SIZE + REGISTER_PAYLOAD_SIZE);
    put_request_header(&mut buf, &header);
    buf.put_slice(name.as_bytes());
    buf.put_bytes(0, NAME_FIELD_SIZE - name.len());
    buf.put_slice(public_key);
    Ok(buf)
}

/// Encodes a 601 ClientsList request (empty payload).
#[must_use]
pub fn encode_clients_list(client_id: ClientId) -> BytesMut {
    let header = RequestHeader::new(client_id, RequestCode::ClientsList, 0);
    encode_request_header(&header)
}

/// Encodes a 602 PublicKey request for `target`.
#[must_use]
pub fn encode_public_key_request(client_id: ClientId, target: ClientId) -> BytesMut {
    let header = RequestHeader::new(client_id, RequestCode::PublicKey, CLIENT_ID_SIZE as u32);
    let mut buf = BytesMut::with_capacity(REQUEST_HEADER_SIZE + CLIENT_ID_SIZE);
    put_request_header(&mut buf, &header);
    buf.put_slice(target.as_bytes());
    buf
}

/// Encodes a 603 SendMessage request.
///
/// # Errors
/// Returns `PayloadTooLarge` if the content size does not fit the u32
/// size fields on the wire.
pub fn encode_send_message(
    client_id: ClientId,
    dest: ClientId,
    kind: MessageKind,
    content: &[u8],
) -> Result<BytesMut> {
    let max = u32::MAX as usize - SEND_MESSAGE_PREFIX_SIZE;
    let content_size = u32::try_from(content.len())
        .ok()
        .filter(|&n| (n as usize) <= max)
        .ok_or(CoreError::PayloadTooLarge {
            max,
            actual: content.len(),
        })?;

    let payload_size = SEND_MESSAGE_PREFIX_SIZE as u32 + content_size;
    let header = RequestHeader::new(client_id, RequestCode::SendMessage, payload_size);

    let mut buf = BytesMut::with_capacity(REQUEST_HEADER_SIZE + payload_size as usize);
    put_request_header(&mut buf, &header);
    buf.put_slice(dest.as_bytes());
    buf.put_u8(kind.as_byte());
    buf.put_u32_le(content_size);
    buf.put_slice(content);
    Ok(buf)
}

/// Encodes a 604 PendingMessages request (empty payload).
#[must_use]
pub fn encode_pending_request(client_id: ClientId) -> BytesMut {
    let header = RequestHeader::new(client_id, RequestCode::PendingMessages, 0);
    encode_request_header(&header)
}

// ============================================
// Response Header & Validation
// ============================================

/// Decodes a response header from bytes.
///
/// # Errors
/// Returns `MalformedHeader` if the buffer is shorter than 7 bytes.
pub fn decode_response_header(buf: &[u8]) -> Result<ResponseHeader> {
    if buf.len() < RESPONSE_HEADER_SIZE {
        return Err(CoreError::malformed_header(format!(
            "response header needs {RESPONSE_HEADER_SIZE} bytes, got {}",
            buf.len()
        )));
    }

    let mut buf = buf;
    let version = buf.get_u8();
    let code = buf.get_u16_le();
    let payload_size = buf.get_u32_le();

    Ok(ResponseHeader {
        version,
        code,
        payload_size,
    })
}

/// Validates a response header against the code the request expects.
///
/// # Contract
/// - code 9000 maps to `ServerFailure`
/// - any other code mismatch is `UnexpectedCode`
/// - fixed-size codes must declare exactly their known payload size
/// - a Users payload must be a whole number of 271-byte records
///   (Pending is validated record-by-record during parse)
///
/// # Errors
/// Returns the corresponding framing error on any violation.
pub fn validate_response(header: &ResponseHeader, expected: ResponseCode) -> Result<()> {
    if header.code == ResponseCode::Error.as_u16() {
        return Err(CoreError::ServerFailure);
    }

    if header.code != expected.as_u16() {
        return Err(CoreError::unexpected_code(header.code, expected.as_u16()));
    }

    let declared = header.payload_size as usize;
    if let Some(required) = expected.fixed_payload_size() {
        if declared != required {
            return Err(CoreError::wrong_payload_size(required, declared));
        }
    } else if expected == ResponseCode::Users && declared % USER_RECORD_SIZE != 0 {
        return Err(CoreError::record_boundary(
            declared - declared % USER_RECORD_SIZE,
            declared,
        ));
    }

    Ok(())
}

// ============================================
// Response Decoders
// ============================================

/// Decodes a Registered (2100) payload into the assigned identity.
///
/// # Errors
/// Returns `WrongPayloadSize` if the payload is not exactly 16 bytes.
pub fn decode_registered(payload: &[u8]) -> Result<ClientId> {
    ClientId::from_bytes(payload)
        .ok_or_else(|| CoreError::wrong_payload_size(CLIENT_ID_SIZE, payload.len()))
}

/// Decodes a Users (2101) payload into user records.
///
/// # Errors
/// Returns `RecordBoundary` if the payload is not a whole number of
/// 271-byte records.
pub fn decode_users(payload: &[u8]) -> Result<Vec<UserRecord>> {
    if payload.len() % USER_RECORD_SIZE != 0 {
        return Err(CoreError::record_boundary(
            payload.len() - payload.len() % USER_RECORD_SIZE,
            payload.len(),
        ));
    }

    let mut users = Vec::with_capacity(payload.len() / USER_RECORD_SIZE);
    for record in payload.chunks_exact(USER_RECORD_SIZE) {
        let mut buf = record;
        let mut id = [0u8; CLIENT_ID_SIZE];
        buf.copy_to_slice(&mut id);
        users.push(UserRecord {
            id: ClientId::from(id),
            name: decode_name_field(buf),
        });
    }
    Ok(users)
}

/// Decodes a PublicKey (2102) payload.
///
/// # Errors
/// Returns `WrongPayloadSize` if the payload is not exactly 176 bytes.
pub fn decode_public_key(payload: &[u8]) -> Result<PublicKeyRecord> {
    if payload.len() != CLIENT_ID_SIZE + PUBLIC_KEY_SIZE {
        return Err(CoreError::wrong_payload_size(
            CLIENT_ID_SIZE + PUBLIC_KEY_SIZE,
            payload.len(),
        ));
    }

    let mut buf = payload;
    let mut id = [0u8; CLIENT_ID_SIZE];
    buf.copy_to_slice(&mut id);
    let mut public_key = [0u8; PUBLIC_KEY_SIZE];
    buf.copy_to_slice(&mut public_key);

    Ok(PublicKeyRecord {
        id: ClientId::from(id),
        public_key,
    })
}

/// Decodes a MessageSent (2103) payload.
///
/// # Errors
/// Returns `WrongPayloadSize` if the payload is not exactly 20 bytes.
pub fn decode_message_sent(payload: &[u8]) -> Result<MessageSentAck> {
    if payload.len() != CLIENT_ID_SIZE + 4 {
        return Err(CoreError::wrong_payload_size(
            CLIENT_ID_SIZE + 4,
            payload.len(),
        ));
    }

    let mut buf = payload;
    let mut dest = [0u8; CLIENT_ID_SIZE];
    buf.copy_to_slice(&mut dest);
    let message_id = buf.get_u32_le();

    Ok(MessageSentAck {
        dest: ClientId::from(dest),
        message_id,
    })
}

/// Decodes a Pending (2104) payload into message records, in server order.
///
/// # Errors
/// Returns `RecordBoundary` when a record header or its declared content
/// extends past the end of the payload.
pub fn decode_pending(payload: &[u8]) -> Result<Vec<PendingRecord>> {
    let mut records = Vec::new();
    let mut offset = 0;

    while offset < payload.len() {
        if payload.len() - offset < PENDING_RECORD_HEADER_SIZE {
            return Err(CoreError::record_boundary(offset, payload.len()));
        }

        let mut buf = &payload[offset..];
        let mut from = [0u8; CLIENT_ID_SIZE];
        buf.copy_to_slice(&mut from);
        let message_id = buf.get_u32_le();
        let kind = buf.get_u8();
        let content_size = buf.get_u32_le() as usize;

        let content_start = offset + PENDING_RECORD_HEADER_SIZE;
        let content_end = content_start
            .checked_add(content_size)
            .filter(|&end| end <= payload.len())
            .ok_or_else(|| CoreError::record_boundary(offset, payload.len()))?;

        records.push(PendingRecord {
            from: ClientId::from(from),
            message_id,
            kind,
            content: payload[content_start..content_end].to_vec(),
        });
        offset = content_end;
    }

    Ok(records)
}

/// Extracts a display name from a zero-padded, null-terminated wire field.
fn decode_name_field(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::version::PROTOCOL_VERSION;

    fn id(byte: u8) -> ClientId {
        ClientId::from([byte; CLIENT_ID_SIZE])
    }

    #[test]
    fn test_request_header_roundtrip() {
        for (code, payload_size) in [
            (RequestCode::Register, 415u32),
            (RequestCode::ClientsList, 0),
            (RequestCode::PublicKey, 16),
            (RequestCode::SendMessage, 21),
            (RequestCode::PendingMessages, 0),
        ] {
            let original = RequestHeader::new(id(0x42), code, payload_size);
            let encoded = encode_request_header(&original);
            assert_eq!(encoded.len(), REQUEST_HEADER_SIZE);

            let decoded = decode_request_header(&encoded).unwrap();
            assert_eq!(original, decoded);
        }
    }

    #[test]
    fn test_request_header_layout() {
        let header = RequestHeader::new(id(0xAA), RequestCode::SendMessage, 0x0102_0304);
        let encoded = encode_request_header(&header);

        // ident[16] | version | code LE | payload_size LE
        assert_eq!(&encoded[..16], &[0xAA; 16]);
        assert_eq!(encoded[16], PROTOCOL_VERSION);
        assert_eq!(&encoded[17..19], &603u16.to_le_bytes());
        assert_eq!(&encoded[19..23], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_decode_request_header_too_short() {
        let err = decode_request_header(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, CoreError::MalformedHeader { .. }));
    }

    #[test]
    fn test_encode_register_layout() {
        let pubkey = [0x55u8; PUBLIC_KEY_SIZE];
        let packet = encode_register("alice", &pubkey).unwrap();

        assert_eq!(packet.len(), REQUEST_HEADER_SIZE + REGISTER_PAYLOAD_SIZE);
        // Registration transmits a zero identity
        assert_eq!(&packet[..16], &[0u8; 16]);
        assert_eq!(&packet[17..19], &600u16.to_le_bytes());

        // Name is null-terminated and zero-padded to 255 bytes
        let name_field = &packet[REQUEST_HEADER_SIZE..REQUEST_HEADER_SIZE + NAME_FIELD_SIZE];
        assert_eq!(&name_field[..5], b"alice");
        assert!(name_field[5..].iter().all(|&b| b == 0));

        let key_field = &packet[REQUEST_HEADER_SIZE + NAME_FIELD_SIZE..];
        assert_eq!(key_field, &pubkey[..]);
    }

    #[test]
    fn test_encode_register_name_too_long() {
        let pubkey = [0u8; PUBLIC_KEY_SIZE];
        let long = "a".repeat(MAX_NAME_SIZE + 1);
        assert!(encode_register(&long, &pubkey).is_err());

        let max = "a".repeat(MAX_NAME_SIZE);
        assert!(encode_register(&max, &pubkey).is_ok());
    }

    #[test]
    fn test_encode_send_message_layout() {
        let content = b"ciphertext bytes";
        let packet =
            encode_send_message(id(0x01), id(0x02), MessageKind::Text, content).unwrap();

        let header = decode_request_header(&packet).unwrap();
        assert_eq!(header.code, RequestCode::SendMessage);
        assert_eq!(
            header.payload_size as usize,
            SEND_MESSAGE_PREFIX_SIZE + content.len()
        );

        let payload = &packet[REQUEST_HEADER_SIZE..];
        assert_eq!(&payload[..16], id(0x02).as_bytes());
        assert_eq!(payload[16], MessageKind::Text.as_byte());
        assert_eq!(&payload[17..21], &(content.len() as u32).to_le_bytes());
        assert_eq!(&payload[21..], content);
    }

    #[test]
    fn test_response_header_roundtrip() {
        let mut buf = BytesMut::new();
        buf.put_u8(PROTOCOL_VERSION);
        buf.put_u16_le(2101);
        buf.put_u32_le(542);

        let header = decode_response_header(&buf).unwrap();
        assert_eq!(header.version, PROTOCOL_VERSION);
        assert_eq!(header.code, 2101);
        assert_eq!(header.code(), Some(ResponseCode::Users));
        assert_eq!(header.payload_size, 542);
    }

    #[test]
    fn test_decode_response_header_too_short() {
        let err = decode_response_header(&[2, 0x34]).unwrap_err();
        assert!(matches!(err, CoreError::MalformedHeader { .. }));
    }

    #[test]
    fn test_validate_response_server_failure() {
        let header = ResponseHeader {
            version: PROTOCOL_VERSION,
            code: 9000,
            payload_size: 0,
        };
        let err = validate_response(&header, ResponseCode::Registered).unwrap_err();
        assert!(matches!(err, CoreError::ServerFailure));
    }

    #[test]
    fn test_validate_response_unexpected_code() {
        let header = ResponseHeader {
            version: PROTOCOL_VERSION,
            code: 2103,
            payload_size: 20,
        };
        let err = validate_response(&header, ResponseCode::Registered).unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnexpectedCode {
                got: 2103,
                expected: 2100
            }
        ));
    }

    #[test]
    fn test_validate_response_wrong_payload_size() {
        // A 2102 missing its leading identity field
        let header = ResponseHeader {
            version: PROTOCOL_VERSION,
            code: 2102,
            payload_size: PUBLIC_KEY_SIZE as u32,
        };
        let err = validate_response(&header, ResponseCode::PublicKey).unwrap_err();
        assert!(matches!(
            err,
            CoreError::WrongPayloadSize {
                expected: 176,
                actual: 160
            }
        ));
    }

    #[test]
    fn test_validate_response_users_record_boundary() {
        let header = ResponseHeader {
            version: PROTOCOL_VERSION,
            code: 2101,
            payload_size: USER_RECORD_SIZE as u32 + 10,
        };
        let err = validate_response(&header, ResponseCode::Users).unwrap_err();
        assert!(matches!(err, CoreError::RecordBoundary { .. }));

        // Zero records and whole records are both fine
        for n in [0u32, 1, 3] {
            let header = ResponseHeader {
                version: PROTOCOL_VERSION,
                code: 2101,
                payload_size: n * USER_RECORD_SIZE as u32,
            };
            assert!(validate_response(&header, ResponseCode::Users).is_ok());
        }
    }

    #[test]
    fn test_decode_registered() {
        let payload = [0x07u8; CLIENT_ID_SIZE];
        assert_eq!(decode_registered(&payload).unwrap(), id(0x07));

        let err = decode_registered(&[0u8; 8]).unwrap_err();
        assert!(matches!(err, CoreError::WrongPayloadSize { .. }));
    }

    fn user_record_bytes(record_id: ClientId, name: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(USER_RECORD_SIZE);
        bytes.extend_from_slice(record_id.as_bytes());
        bytes.extend_from_slice(name.as_bytes());
        bytes.resize(USER_RECORD_SIZE, 0);
        bytes
    }

    #[test]
    fn test_decode_users() {
        let mut payload = user_record_bytes(id(0xAA), "bob");
        payload.extend(user_record_bytes(id(0xBB), "carol"));

        let users = decode_users(&payload).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, id(0xAA));
        assert_eq!(users[0].name, "bob");
        assert_eq!(users[1].id, id(0xBB));
        assert_eq!(users[1].name, "carol");
    }

    #[test]
    fn test_decode_users_empty_and_boundary() {
        assert!(decode_users(&[]).unwrap().is_empty());

        let payload = vec![0u8; USER_RECORD_SIZE + 1];
        let err = decode_users(&payload).unwrap_err();
        assert!(matches!(err, CoreError::RecordBoundary { .. }));
    }

    #[test]
    fn test_decode_public_key_roundtrip() {
        let mut payload = Vec::with_capacity(CLIENT_ID_SIZE + PUBLIC_KEY_SIZE);
        payload.extend_from_slice(id(0xCC).as_bytes());
        payload.extend_from_slice(&[0x33u8; PUBLIC_KEY_SIZE]);

        let record = decode_public_key(&payload).unwrap();
        assert_eq!(record.id, id(0xCC));
        assert_eq!(record.public_key, [0x33u8; PUBLIC_KEY_SIZE]);

        let err = decode_public_key(&payload[..100]).unwrap_err();
        assert!(matches!(err, CoreError::WrongPayloadSize { .. }));
    }

    #[test]
    fn test_decode_message_sent() {
        let mut payload = Vec::new();
        payload.extend_from_slice(id(0xDD).as_bytes());
        payload.extend_from_slice(&77u32.to_le_bytes());

        let ack = decode_message_sent(&payload).unwrap();
        assert_eq!(ack.dest, id(0xDD));
        assert_eq!(ack.message_id, 77);
    }

    fn pending_record_bytes(from: ClientId, message_id: u32, kind: u8, content: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(from.as_bytes());
        bytes.extend_from_slice(&message_id.to_le_bytes());
        bytes.push(kind);
        bytes.extend_from_slice(&(content.len() as u32).to_le_bytes());
        bytes.extend_from_slice(content);
        bytes
    }

    #[test]
    fn test_decode_pending_preserves_server_order() {
        let mut payload = pending_record_bytes(id(0xAA), 1, 1, &[]);
        payload.extend(pending_record_bytes(id(0xBB), 2, 3, b"cipher"));
        payload.extend(pending_record_bytes(id(0xAA), 3, 4, &[0xFF; 32]));

        let records = decode_pending(&payload).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].message_id, 1);
        assert_eq!(records[0].kind(), Some(MessageKind::KeyRequest));
        assert!(records[0].content.is_empty());

        assert_eq!(records[1].from, id(0xBB));
        assert_eq!(records[1].kind(), Some(MessageKind::Text));
        assert_eq!(records[1].content, b"cipher");

        assert_eq!(records[2].kind(), Some(MessageKind::File));
        assert_eq!(records[2].content.len(), 32);
    }

    #[test]
    fn test_decode_pending_empty() {
        assert!(decode_pending(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_pending_unknown_kind_is_not_a_parse_error() {
        let payload = pending_record_bytes(id(0x01), 9, 42, b"??");
        let records = decode_pending(&payload).unwrap();
        assert_eq!(records[0].kind, 42);
        assert_eq!(records[0].kind(), None);
    }

    #[test]
    fn test_decode_pending_record_boundary() {
        // Truncated record header
        let payload = vec![0u8; PENDING_RECORD_HEADER_SIZE - 1];
        assert!(matches!(
            decode_pending(&payload).unwrap_err(),
            CoreError::RecordBoundary { .. }
        ));

        // Content extends past the payload end
        let mut payload = pending_record_bytes(id(0x01), 1, 3, b"full content");
        payload.truncate(payload.len() - 4);
        assert!(matches!(
            decode_pending(&payload).unwrap_err(),
            CoreError::RecordBoundary { .. }
        ));

        // Content size that would overflow the offset arithmetic
        let mut payload = pending_record_bytes(id(0x01), 1, 3, b"");
        let size_offset = CLIENT_ID_SIZE + 4 + 1;
        payload[size_offset..size_offset + 4].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            decode_pending(&payload).unwrap_err(),
            CoreError::RecordBoundary { .. }
        ));
    }
}
