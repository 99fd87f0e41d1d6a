//! # UDP Transport
//!
//! Datagram exchange with the appliance on its fixed control port.
//!
//! Each attempt binds a fresh ephemeral socket, connects it to the device
//! address (so the kernel filters datagrams from other peers), sends the
//! frame, and waits for one reply within the timeout. The socket is owned
//! by the call scope and released on success, timeout, cancellation, or
//! any fault.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;
use tracing::{instrument, trace};

use crate::error::Result;
use crate::transport::Transport;
use crate::utils::timeout::with_timeout;

/// Control port the appliance listens on.
pub const DEVICE_PORT: u16 = 54321;

/// Receive buffer size; comfortably above the largest observed reply.
pub const RECV_BUFFER_LEN: usize = 4096;

/// UDP transport bound to a single device endpoint.
#[derive(Debug, Clone)]
pub struct UdpTransport {
    remote: SocketAddr,
}

impl UdpTransport {
    /// Transport for a device at `ip` on the standard control port.
    pub fn new(ip: IpAddr) -> Self {
        Self {
            remote: SocketAddr::new(ip, DEVICE_PORT),
        }
    }

    /// Transport for an explicit endpoint (test rigs, port forwards).
    pub fn with_addr(remote: SocketAddr) -> Self {
        Self { remote }
    }

    pub fn remote_addr(&self) -> SocketAddr {
        self.remote
    }

    fn local_bind_addr(&self) -> SocketAddr {
        // Match the address family of the remote endpoint.
        let unspecified: IpAddr = if self.remote.is_ipv4() {
            std::net::Ipv4Addr::UNSPECIFIED.into()
        } else {
            std::net::Ipv6Addr::UNSPECIFIED.into()
        };
        SocketAddr::new(unspecified, 0)
    }
}

impl Transport for UdpTransport {
    #[instrument(skip(self, frame), fields(remote = %self.remote, bytes = frame.len()))]
    async fn round_trip(&self, frame: &[u8], timeout: Duration) -> Result<Vec<u8>> {
        let socket = UdpSocket::bind(self.local_bind_addr()).await?;
        socket.connect(self.remote).await?;
        socket.send(frame).await?;
        trace!("datagram sent, awaiting reply");

        let mut buf = vec![0u8; RECV_BUFFER_LEN];
        let received = with_timeout(socket.recv(&mut buf), timeout).await??;
        buf.truncate(received);
        trace!(bytes = received, "reply received");
        Ok(buf)
    }
}
