//! # Error Types
//!
//! Comprehensive error handling for the vacuum control protocol.
//!
//! This module defines all error variants that can occur during protocol
//! operations, from low-level I/O errors to device-reported failures.
//!
//! ## Error Categories
//! - **I/O Errors**: Socket and file system failures
//! - **Device Errors**: Error objects reported by the appliance itself,
//!   including the terminal "no response" error after retry exhaustion
//! - **Decode Errors**: Malformed frames, checksum mismatches, invalid
//!   padding, unparseable payloads
//! - **Configuration Errors**: Malformed tokens, addresses, or config files
//!
//! All errors implement `std::error::Error` for interoperability.

use serde_json::Value;
use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
/// Static strings are borrowed, avoiding heap allocations for common error cases.
pub mod constants {
    /// Retry exhaustion
    pub const ERR_NO_RESPONSE: &str = "No response from the device";

    /// Frame validation errors
    pub const ERR_INVALID_HEADER: &str = "Invalid frame header";
    pub const ERR_CHECKSUM_MISMATCH: &str = "Frame checksum mismatch";
    pub const ERR_INVALID_PADDING: &str = "Invalid payload padding";

    /// Token errors
    pub const ERR_TOKEN_LENGTH: &str = "Device token must be 32 hex characters (16 bytes)";
    pub const ERR_TOKEN_HEX: &str = "Device token is not valid hex";

    /// Timing
    pub const ERR_TIMEOUT: &str = "Operation timed out";
}

/// ProtocolError is the primary error type for all protocol operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error object reported by the device in its response payload.
    #[error("device error (code {code:?}, message {message:?})")]
    Device {
        code: Option<Value>,
        message: Option<String>,
    },

    /// All retry attempts elapsed without a reply datagram.
    #[error("no response from the device")]
    NoResponse,

    #[error("payload decode error: {0}")]
    PayloadDecode(String),

    #[error("frame checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid frame header")]
    InvalidHeader,

    #[error("truncated frame: {0} bytes")]
    TruncatedFrame(usize),

    #[error("frame too large: {0} bytes")]
    OversizedFrame(usize),

    #[error("operation timed out")]
    Timeout,

    #[error("serialization error: {0}")]
    SerializeError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    /// Build a device error from the `error` object of a response payload.
    pub fn device(code: Option<Value>, message: Option<String>) -> Self {
        ProtocolError::Device { code, message }
    }

    /// True for failures produced while decoding a received frame.
    ///
    /// Decode failures are terminal for a `send_command` invocation; only
    /// timeouts are retried.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            ProtocolError::PayloadDecode(_)
                | ProtocolError::ChecksumMismatch
                | ProtocolError::InvalidHeader
                | ProtocolError::TruncatedFrame(_)
        )
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
