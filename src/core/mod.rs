//! # Core Protocol Components
//!
//! Low-level frame handling: the binary codec, the encryption envelope,
//! and the keyed integrity checksum.
//!
//! ## Components
//! - **Frame**: Fixed-layout binary frame with magic bytes and checksum
//! - **Crypto**: AES-128-CBC payload envelope keyed from the shared token
//! - **Checksum**: Keyed MD5 digest over header, token, and payload
//!
//! ## Wire Format
//! ```text
//! [Magic(2)] [Length(2)] [Reserved(4)] [DeviceId(4)] [Timestamp(4)] [Payload(N)] [Checksum(16)]
//! ```

pub mod checksum;
pub mod crypto;
pub mod frame;
