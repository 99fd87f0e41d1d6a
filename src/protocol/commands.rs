//! # Command Helpers
//!
//! Thin parameter-shaping wrappers over [`ProtocolClient::send_command`]
//! for the named device operations.

use serde_json::{json, Value};

use crate::error::Result;
use crate::protocol::client::ProtocolClient;
use crate::transport::Transport;

/// Query the device's current status report.
pub async fn get_status<T: Transport>(client: &mut ProtocolClient<T>) -> Result<Value> {
    client.send_command("get_status", vec![]).await
}

/// Navigate to map coordinates `(x, y)`.
pub async fn goto_target<T: Transport>(
    client: &mut ProtocolClient<T>,
    x: i32,
    y: i32,
) -> Result<Value> {
    client
        .send_command("app_goto_target", vec![json!(x), json!(y)])
        .await
}

/// Send the device back to its charging dock.
pub async fn return_to_dock<T: Transport>(client: &mut ProtocolClient<T>) -> Result<Value> {
    client.send_command("app_charge", vec![]).await
}
