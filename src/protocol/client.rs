//! # Protocol Client
//!
//! The public-facing connection to one device: owns the shared token, the
//! request-sequence counter, and the retry policy, and drives the frame
//! codec and transport through a single `send_command` operation.
//!
//! ## State Machine
//! ```text
//! Building -> Sending -> AwaitingReply -> Success
//!                              |
//!                           TimedOut -> budget left?  yes -> bump id, Building
//!                                                     no  -> NoResponse
//! ```
//! Retries are an explicit bounded loop. Only timeouts are retried; decode
//! failures and other I/O faults surface immediately, since a garbled or
//! refused frame says nothing about the next attempt's network conditions.
//!
//! ## Concurrency
//! `send_command` takes `&mut self`: at most one exchange is in flight per
//! client, which is what makes the plain sequence-counter field safe.
//! Independent clients share no state and may run concurrently.

use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::config::DeviceConfig;
use crate::core::crypto::DeviceToken;
use crate::core::frame::{self, ChecksumMode};
use crate::error::{ProtocolError, Result};
use crate::protocol::message::{next_sequence, Request, Response};
use crate::transport::{Transport, UdpTransport};
use crate::utils::observer::TraceObserver;
use crate::utils::time;
use crate::utils::timeout::DEFAULT_TIMEOUT;

/// Additional attempts after the first send.
pub const DEFAULT_RETRY_COUNT: u32 = 10;

/// Client for a single device connection.
///
/// Generic over the transport so the state machine can be exercised
/// against scripted transports in tests; production code uses the
/// [`UdpTransport`] default.
pub struct ProtocolClient<T = UdpTransport> {
    transport: T,
    token: DeviceToken,
    device_id: u32,
    sequence: u16,
    timeout: Duration,
    retry_count: u32,
    checksum_mode: ChecksumMode,
    observer: Option<Box<dyn TraceObserver>>,
}

impl ProtocolClient<UdpTransport> {
    /// Build a client from a device configuration.
    pub fn from_config(config: &DeviceConfig) -> Result<Self> {
        let token = DeviceToken::from_hex(&config.token)?;
        let ip = config
            .ip
            .parse()
            .map_err(|_| ProtocolError::ConfigError(format!("invalid device ip: {}", config.ip)))?;

        let mut client = Self::new(UdpTransport::new(ip), token, config.device_id);
        if let Some(ms) = config.timeout_ms {
            client.timeout = Duration::from_millis(ms);
        }
        if let Some(count) = config.retry_count {
            client.retry_count = count;
        }
        Ok(client)
    }
}

impl<T: Transport> ProtocolClient<T> {
    /// Build a client over an explicit transport.
    pub fn new(transport: T, token: DeviceToken, device_id: u32) -> Self {
        Self {
            transport,
            token,
            device_id,
            sequence: 0,
            timeout: DEFAULT_TIMEOUT,
            retry_count: DEFAULT_RETRY_COUNT,
            checksum_mode: ChecksumMode::default(),
            observer: None,
        }
    }

    /// Initial sequence id, clamped into the valid range by wrapping.
    pub fn with_start_id(mut self, id: u16) -> Self {
        self.sequence = id % crate::protocol::message::MAX_SEQUENCE_ID;
        self
    }

    /// Per-attempt reply timeout (default 5 s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry budget beyond the first attempt (default 10).
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Checksum handling for inbound frames (default enforce).
    pub fn with_checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Install a trace observer for frame- and payload-level events.
    pub fn with_observer(mut self, observer: Box<dyn TraceObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Current sequence id; the next request will carry this value.
    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Send a command and return the device's result value.
    pub async fn send_command(&mut self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.send_command_with_extra(method, params, Map::new())
            .await
    }

    /// Send a command with extra top-level fields merged into the request.
    #[instrument(skip(self, params, extra), fields(method = method, id = self.sequence))]
    pub async fn send_command_with_extra(
        &mut self,
        method: &str,
        params: Vec<Value>,
        extra: Map<String, Value>,
    ) -> Result<Value> {
        let mut retries_remaining = self.retry_count;

        loop {
            let request =
                Request::new(self.sequence, method, params.clone()).with_extra(extra.clone());
            if let Some(observer) = &self.observer {
                observer.on_request(&request);
            }

            let frame = frame::encode(&request, self.device_id, time::unix_now(), &self.token)?;
            if let Some(observer) = &self.observer {
                observer.on_frame_sent(&frame);
            }
            debug!(id = request.id, bytes = frame.len(), "sending frame");

            match self.transport.round_trip(&frame, self.timeout).await {
                Ok(datagram) => {
                    if let Some(observer) = &self.observer {
                        observer.on_frame_received(&datagram);
                    }
                    return self.resolve_reply(&datagram);
                }
                Err(ProtocolError::Timeout) => {
                    if retries_remaining == 0 {
                        warn!(method, "retry budget exhausted");
                        return Err(ProtocolError::NoResponse);
                    }
                    retries_remaining -= 1;
                    self.sequence = next_sequence(self.sequence);
                    debug!(retries_remaining, id = self.sequence, "timeout, retrying");
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Decode a reply datagram, sync the sequence counter, and resolve the
    /// payload into a result or device error.
    fn resolve_reply(&mut self, datagram: &[u8]) -> Result<Value> {
        let decoded = frame::decode(datagram, &self.token, self.checksum_mode)?;
        let response = Response::from_value(decoded.payload);
        if let Some(observer) = &self.observer {
            observer.on_response(&response);
        }

        // The device's echoed id is authoritative; the counter is
        // overwritten with it and then advanced past it. A bare payload
        // without an id just advances the local counter.
        self.sequence = match response.id {
            Some(id) => next_sequence(id.min(u64::from(u16::MAX)) as u16),
            None => next_sequence(self.sequence),
        };

        response.into_result()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ProtocolClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolClient")
            .field("transport", &self.transport)
            .field("device_id", &self.device_id)
            .field("sequence", &self.sequence)
            .field("timeout", &self.timeout)
            .field("retry_count", &self.retry_count)
            .field("checksum_mode", &self.checksum_mode)
            .finish_non_exhaustive()
    }
}
