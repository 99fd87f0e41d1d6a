//! # Transport Layer
//!
//! One-datagram-per-attempt delivery of encoded frames.
//!
//! The [`Transport`] trait is the seam between the client state machine and
//! the network: the client never touches a socket directly, so the retry
//! logic is testable against scripted transports.

use std::time::Duration;

use crate::error::Result;

pub mod udp;

pub use udp::UdpTransport;

/// A single send-and-wait exchange with the device.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Send `frame` as one datagram and wait up to `timeout` for a reply.
    ///
    /// Implementations must release any acquired socket on every exit path,
    /// including timeout and cancellation of the returned future.
    async fn round_trip(&self, frame: &[u8], timeout: Duration) -> Result<Vec<u8>>;
}
