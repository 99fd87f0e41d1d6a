//! # Protocol Layer
//!
//! Logical request/response messages, the single-device client with its
//! retry state machine, and the named command helpers.

pub mod client;
pub mod commands;
pub mod message;

pub use client::{ProtocolClient, DEFAULT_RETRY_COUNT};
pub use message::{Request, Response, ResponseBody, MAX_SEQUENCE_ID};
