//! # Binary Frame Codec
//!
//! Fixed-layout frame assembly and parsing for the vacuum control protocol.
//!
//! ## Wire Format
//! ```text
//! [Magic(2)] [Length(2)] [Reserved(4)] [DeviceId(4)] [Timestamp(4)] [Payload(N)] [Checksum(16)]
//! ```
//! All integer fields are big-endian. `Length` is the total frame length,
//! `32 + N`; it is always recomputed from the actual encrypted payload,
//! never taken from a caller.
//!
//! ## Security
//! - Magic bytes reject frames from unrelated senders on the same port
//! - Declared length must match the received datagram exactly
//! - The keyed checksum is verified before decryption by default

use bytes::BufMut;
use serde_json::Value;

use crate::core::checksum::{self, CHECKSUM_LEN};
use crate::core::crypto::{self, DeviceToken};
use crate::error::{ProtocolError, Result};
use crate::protocol::message::Request;

/// Magic marker opening every frame.
pub const FRAME_MAGIC: u16 = 0x2131;

/// Serialized header length in bytes.
pub const HEADER_LEN: usize = 16;

/// Fixed per-frame overhead: header plus trailing checksum.
pub const FRAME_OVERHEAD: usize = HEADER_LEN + CHECKSUM_LEN;

/// Largest encodable frame; the length field is 16 bits.
pub const MAX_FRAME_LEN: usize = u16::MAX as usize;

/// Whether the checksum of inbound frames is verified.
///
/// The reference appliance stack parses frames without comparing the
/// digest. Verification defaults to [`ChecksumMode::Enforce`] here;
/// [`ChecksumMode::Ignore`] reproduces the permissive behavior for
/// devices whose firmware emits informational checksums only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumMode {
    /// Reject frames whose checksum does not match (default).
    #[default]
    Enforce,
    /// Skip verification and decrypt regardless.
    Ignore,
}

/// Parsed frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Total frame length, `32 + payload length`.
    pub length: u16,
    /// Reserved field, zero on every known firmware.
    pub reserved: u32,
    /// Raw device identifier.
    pub device_id: u32,
    /// UNIX seconds, UTC.
    pub timestamp: u32,
}

impl Header {
    fn parse(bytes: &[u8]) -> Result<Self> {
        debug_assert!(bytes.len() >= HEADER_LEN);
        let magic = u16::from_be_bytes([bytes[0], bytes[1]]);
        if magic != FRAME_MAGIC {
            return Err(ProtocolError::InvalidHeader);
        }
        Ok(Self {
            length: u16::from_be_bytes([bytes[2], bytes[3]]),
            reserved: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            device_id: u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            timestamp: u32::from_be_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        })
    }

    fn write(&self, buf: &mut Vec<u8>) {
        buf.put_u16(FRAME_MAGIC);
        buf.put_u16(self.length);
        buf.put_u32(self.reserved);
        buf.put_u32(self.device_id);
        buf.put_u32(self.timestamp);
    }
}

/// A decoded frame: validated header plus the decrypted JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub header: Header,
    pub payload: Value,
}

/// Encode a logical request into a complete wire frame.
pub fn encode(
    request: &Request,
    device_id: u32,
    timestamp: u32,
    token: &DeviceToken,
) -> Result<Vec<u8>> {
    encode_payload(request, device_id, timestamp, token)
}

/// Encode an arbitrary JSON-serializable payload into a wire frame.
///
/// Encryption happens first, then the header is assembled with the
/// recomputed length, then the checksum is taken over
/// `header ∥ token ∥ payload` and appended.
pub fn encode_payload<T: serde::Serialize>(
    payload: &T,
    device_id: u32,
    timestamp: u32,
    token: &DeviceToken,
) -> Result<Vec<u8>> {
    let encrypted = crypto::encrypt(payload, token)?;

    let total = FRAME_OVERHEAD + encrypted.len();
    if total > MAX_FRAME_LEN {
        return Err(ProtocolError::OversizedFrame(total));
    }

    let header = Header {
        length: total as u16,
        reserved: 0,
        device_id,
        timestamp,
    };

    let mut frame = Vec::with_capacity(total);
    header.write(&mut frame);
    let digest = checksum::compute(&frame[..HEADER_LEN], token, &encrypted);
    frame.extend_from_slice(&encrypted);
    frame.extend_from_slice(&digest);
    Ok(frame)
}

/// Decode a received datagram into a [`Frame`].
///
/// Validation order: size, magic, declared length, checksum (subject to
/// `mode`), then decryption. Every failure is a decode error and is never
/// retried by the caller.
pub fn decode(bytes: &[u8], token: &DeviceToken, mode: ChecksumMode) -> Result<Frame> {
    if bytes.len() < FRAME_OVERHEAD {
        return Err(ProtocolError::TruncatedFrame(bytes.len()));
    }

    let header = Header::parse(&bytes[..HEADER_LEN])?;
    let declared = header.length as usize;
    if declared != bytes.len() {
        if declared > bytes.len() {
            return Err(ProtocolError::TruncatedFrame(bytes.len()));
        }
        return Err(ProtocolError::PayloadDecode(format!(
            "declared length {declared} does not match datagram length {}",
            bytes.len()
        )));
    }

    let payload = &bytes[HEADER_LEN..declared - CHECKSUM_LEN];
    let digest = &bytes[declared - CHECKSUM_LEN..];

    if mode == ChecksumMode::Enforce
        && !checksum::verify(digest, &bytes[..HEADER_LEN], token, payload)
    {
        return Err(ProtocolError::ChecksumMismatch);
    }

    let payload = crypto::decrypt(payload, token)?;
    Ok(Frame { header, payload })
}
