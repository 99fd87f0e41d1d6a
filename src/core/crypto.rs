//! # Payload Encryption
//!
//! AES-128-CBC envelope for the JSON command payload, keyed from the
//! device's pre-shared token.
//!
//! The key schedule is fixed by the appliance firmware:
//!
//! ```text
//! key = MD5(token)
//! iv  = MD5(key ∥ token)
//! ```
//!
//! MD5 is cryptographically broken but mandated by the wire protocol; the
//! derivation must match the device's implementation byte for byte, so it
//! is deliberately not upgradeable.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use md5::{Digest, Md5};
use serde::Serialize;
use serde_json::Value;
use zeroize::Zeroize;

use crate::error::{constants, ProtocolError, Result};

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Pre-shared token length in raw bytes.
pub const TOKEN_LEN: usize = 16;

/// AES block length; encrypted payloads are always a multiple of this.
pub const BLOCK_LEN: usize = 16;

/// The device's 16-byte pre-shared secret.
///
/// Parsed once from the 32-character hex string found in the device
/// configuration, held by the client for its lifetime, and passed by
/// reference into the crypto and checksum operations. The raw bytes are
/// wiped on drop and never appear in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceToken([u8; TOKEN_LEN]);

impl DeviceToken {
    /// Parse a token from its 32-character hex representation.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        if hex_str.len() != TOKEN_LEN * 2 {
            return Err(ProtocolError::ConfigError(
                constants::ERR_TOKEN_LENGTH.to_string(),
            ));
        }
        let raw = hex::decode(hex_str)
            .map_err(|_| ProtocolError::ConfigError(constants::ERR_TOKEN_HEX.to_string()))?;
        let mut bytes = [0u8; TOKEN_LEN];
        bytes.copy_from_slice(&raw);
        Ok(Self(bytes))
    }

    /// Construct from raw bytes (primarily for tests and fixtures).
    pub fn from_bytes(bytes: [u8; TOKEN_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TOKEN_LEN] {
        &self.0
    }
}

impl Drop for DeviceToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for DeviceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DeviceToken(..)")
    }
}

fn md5(parts: &[&[u8]]) -> [u8; 16] {
    let mut hasher = Md5::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Derive the AES key and IV from the shared token.
///
/// Deterministic by protocol requirement; there is no per-message nonce.
pub fn derive_key_iv(token: &DeviceToken) -> ([u8; 16], [u8; 16]) {
    let key = md5(&[token.as_bytes()]);
    let iv = md5(&[&key, token.as_bytes()]);
    (key, iv)
}

/// Encrypt a JSON payload for transmission.
///
/// The value is serialized to compact JSON, terminated with a single NUL
/// byte, PKCS#7-padded to a block boundary, and encrypted. The result is
/// always a non-empty multiple of [`BLOCK_LEN`].
pub fn encrypt<T: Serialize>(payload: &T, token: &DeviceToken) -> Result<Vec<u8>> {
    let (key, iv) = derive_key_iv(token);
    let mut plaintext =
        serde_json::to_vec(payload).map_err(|e| ProtocolError::SerializeError(e.to_string()))?;
    plaintext.push(0);

    let ciphertext = Aes128CbcEnc::new(&key.into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(&plaintext);
    plaintext.zeroize();
    Ok(ciphertext)
}

/// Decrypt a received payload back into a JSON value.
///
/// Trailing NUL bytes left after unpadding are stripped before parsing.
/// Invalid padding and invalid JSON both surface as payload decode errors.
pub fn decrypt(ciphertext: &[u8], token: &DeviceToken) -> Result<Value> {
    let (key, iv) = derive_key_iv(token);
    let plaintext = Aes128CbcDec::new(&key.into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| ProtocolError::PayloadDecode(constants::ERR_INVALID_PADDING.to_string()))?;

    let end = plaintext
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |pos| pos + 1);

    serde_json::from_slice(&plaintext[..end])
        .map_err(|e| ProtocolError::PayloadDecode(format!("invalid JSON payload: {e}")))
}
