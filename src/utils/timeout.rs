//! Async timeout wrapper mapping elapse onto the protocol error type.

use std::future::Future;
use std::time::Duration;

use crate::error::{ProtocolError, Result};

/// Default wait for a device reply.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `future` for at most `duration`, yielding [`ProtocolError::Timeout`]
/// on elapse.
pub async fn with_timeout<F: Future>(future: F, duration: Duration) -> Result<F::Output> {
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| ProtocolError::Timeout)
}
