//! # Frame Integrity Checksum
//!
//! Keyed MD5 digest covering the frame header, the shared token, and the
//! encrypted payload. The token acts as the key: a receiver that does not
//! hold it cannot forge a matching digest.
//!
//! The reference appliance computes but does not always verify this digest
//! on inbound frames. This implementation makes verification an explicit
//! step so a corrupted or foreign frame is rejected rather than silently
//! decrypted into garbage; see [`crate::core::frame::ChecksumMode`].

use md5::{Digest, Md5};

use crate::core::crypto::DeviceToken;

/// Checksum length in bytes.
pub const CHECKSUM_LEN: usize = 16;

/// Compute the frame checksum: `MD5(header ∥ token ∥ payload)`.
pub fn compute(header: &[u8], token: &DeviceToken, payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Md5::new();
    hasher.update(header);
    hasher.update(token.as_bytes());
    hasher.update(payload);
    hasher.finalize().into()
}

/// Recompute the checksum over the received regions and compare.
pub fn verify(expected: &[u8], header: &[u8], token: &DeviceToken, payload: &[u8]) -> bool {
    expected == compute(header, token, payload)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::core::crypto::TOKEN_LEN;

    fn token() -> DeviceToken {
        DeviceToken::from_bytes([0u8; TOKEN_LEN])
    }

    #[test]
    fn checksum_is_deterministic() {
        let header = [0x21, 0x31, 0x00, 0x20];
        let payload = [0xAB; 16];
        assert_eq!(
            compute(&header, &token(), &payload),
            compute(&header, &token(), &payload)
        );
    }

    #[test]
    fn checksum_covers_every_region() {
        let header = [0x21u8, 0x31, 0x00, 0x30, 0, 0, 0, 0];
        let payload = [0x55u8; 32];
        let base = compute(&header, &token(), &payload);

        let mut header_flip = header;
        header_flip[3] ^= 0x01;
        assert_ne!(base, compute(&header_flip, &token(), &payload));

        let mut payload_flip = payload;
        payload_flip[31] ^= 0x80;
        assert_ne!(base, compute(&header, &token(), &payload_flip));

        let other_token = DeviceToken::from_bytes([1u8; TOKEN_LEN]);
        assert_ne!(base, compute(&header, &other_token, &payload));
    }

    #[test]
    fn verify_accepts_matching_digest() {
        let header = [1u8, 2, 3, 4];
        let payload = [5u8; 16];
        let digest = compute(&header, &token(), &payload);
        assert!(verify(&digest, &header, &token(), &payload));
        assert!(!verify(&[0u8; CHECKSUM_LEN], &header, &token(), &payload));
    }
}
