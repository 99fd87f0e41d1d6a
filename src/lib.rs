//! # robovac-protocol
//!
//! Client for the encrypted UDP control protocol spoken by
//! network-attached robot-vacuum appliances.
//!
//! The crate is organized in layers:
//! - [`core`]: the fixed-layout binary frame codec, the AES-128-CBC
//!   payload envelope, and the keyed MD5 checksum
//! - [`transport`]: one-datagram-per-attempt UDP delivery behind a
//!   transport trait
//! - [`protocol`]: the logical request/response messages and the
//!   single-device client with its timeout/retry state machine
//! - [`config`] and [`utils`]: device configuration, logging setup,
//!   trace hooks, and timing helpers
//!
//! ## Example
//! ```no_run
//! use robovac_protocol::config::DeviceConfig;
//! use robovac_protocol::protocol::commands;
//! use robovac_protocol::protocol::ProtocolClient;
//!
//! # async fn run() -> robovac_protocol::error::Result<()> {
//! let config = DeviceConfig::from_file("config.toml")?;
//! config.validate_strict()?;
//!
//! let mut client = ProtocolClient::from_config(&config)?;
//! let status = commands::get_status(&mut client).await?;
//! println!("{status}");
//! # Ok(())
//! # }
//! ```

#![warn(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod transport;
pub mod utils;

pub use config::DeviceConfig;
pub use core::crypto::DeviceToken;
pub use core::frame::ChecksumMode;
pub use error::{ProtocolError, Result};
pub use protocol::{ProtocolClient, Request, Response, ResponseBody};
pub use transport::{Transport, UdpTransport};
