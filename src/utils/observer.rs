//! # Trace Observer
//!
//! Injectable hooks for frame-level and payload-level tracing.
//!
//! Verbosity is a property of the observer the caller installs, not of a
//! global logger: tests can capture traffic, applications can forward it
//! to `tracing`, and the default is no observer at all.

use tracing::debug;

use crate::protocol::message::{Request, Response};

/// Callbacks invoked at the edges of a `send_command` exchange.
///
/// All hooks default to no-ops, so an implementation only overrides the
/// events it cares about.
pub trait TraceObserver: Send + Sync {
    /// An encoded frame is about to be sent.
    fn on_frame_sent(&self, _frame: &[u8]) {}

    /// A reply datagram arrived, before decoding.
    fn on_frame_received(&self, _frame: &[u8]) {}

    /// The logical request that will be encoded for this attempt.
    fn on_request(&self, _request: &Request) {}

    /// The decoded response, before result/error resolution.
    fn on_response(&self, _response: &Response) {}
}

/// Observer that forwards all events to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TraceObserver for TracingObserver {
    fn on_frame_sent(&self, frame: &[u8]) {
        debug!(bytes = frame.len(), "frame sent");
    }

    fn on_frame_received(&self, frame: &[u8]) {
        debug!(bytes = frame.len(), "frame received");
    }

    fn on_request(&self, request: &Request) {
        debug!(id = request.id, method = %request.method, "request built");
    }

    fn on_response(&self, response: &Response) {
        debug!(id = ?response.id, "response decoded");
    }
}
