#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Full-stack exchange against a simulated device on a local UDP socket.

use std::time::Duration;

use serde_json::json;
use tokio::net::UdpSocket;

use robovac_protocol::core::crypto::{DeviceToken, TOKEN_LEN};
use robovac_protocol::core::frame::{self, ChecksumMode};
use robovac_protocol::error::ProtocolError;
use robovac_protocol::protocol::{commands, ProtocolClient};
use robovac_protocol::transport::UdpTransport;

const DEVICE_ID: u32 = 77;

fn token() -> DeviceToken {
    DeviceToken::from_bytes([0x21u8; TOKEN_LEN])
}

/// Bind a fake device that answers each decodable request with
/// `{"id": <echo>, "result": <result>}` and drops everything else.
async fn spawn_device(result: serde_json::Value) -> std::net::SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    tokio::spawn(async move {
        let mut buf = vec![0u8; 4096];
        loop {
            let (n, peer) = socket.recv_from(&mut buf).await.unwrap();
            let Ok(request) = frame::decode(&buf[..n], &token(), ChecksumMode::Enforce) else {
                continue; // real firmware stays silent on foreign frames
            };
            let reply = json!({"id": request.payload["id"], "result": result});
            let bytes =
                frame::encode_payload(&reply, DEVICE_ID, request.header.timestamp, &token())
                    .unwrap();
            socket.send_to(&bytes, peer).await.unwrap();
        }
    });
    addr
}

#[tokio::test]
async fn get_status_round_trip() {
    let addr = spawn_device(json!([{"state": 8, "battery": 100}])).await;
    let mut client = ProtocolClient::new(UdpTransport::with_addr(addr), token(), DEVICE_ID)
        .with_timeout(Duration::from_secs(2))
        .with_start_id(1);

    let status = commands::get_status(&mut client).await.unwrap();
    assert_eq!(status, json!([{"state": 8, "battery": 100}]));
    assert_eq!(client.sequence(), 2);
}

#[tokio::test]
async fn goto_target_sends_coordinates() {
    let addr = spawn_device(json!(["ok"])).await;
    let mut client = ProtocolClient::new(UdpTransport::with_addr(addr), token(), DEVICE_ID)
        .with_timeout(Duration::from_secs(2));

    let result = commands::goto_target(&mut client, 23644, 26282).await.unwrap();
    assert_eq!(result, json!(["ok"]));
}

#[tokio::test]
async fn return_to_dock_round_trip() {
    let addr = spawn_device(json!(["ok"])).await;
    let mut client = ProtocolClient::new(UdpTransport::with_addr(addr), token(), DEVICE_ID)
        .with_timeout(Duration::from_secs(2));

    assert_eq!(
        commands::return_to_dock(&mut client).await.unwrap(),
        json!(["ok"])
    );
}

#[tokio::test]
async fn unreachable_device_exhausts_retries() {
    // Bound but silent: the client must time out per attempt and give up.
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = silent.local_addr().unwrap();

    let mut client = ProtocolClient::new(UdpTransport::with_addr(addr), token(), DEVICE_ID)
        .with_timeout(Duration::from_millis(30))
        .with_retry_count(2);

    let err = commands::get_status(&mut client).await.unwrap_err();
    assert!(matches!(err, ProtocolError::NoResponse));
}

#[tokio::test]
async fn wrong_token_fails_decode() {
    let addr = spawn_device(json!(0)).await;
    // The client holds the wrong token, so the device drops its frames
    // and the client only ever observes silence.
    let other = DeviceToken::from_bytes([0x42; TOKEN_LEN]);
    let mut client = ProtocolClient::new(UdpTransport::with_addr(addr), other, DEVICE_ID)
        .with_timeout(Duration::from_millis(30))
        .with_retry_count(1);

    let err = commands::get_status(&mut client).await.unwrap_err();
    assert!(matches!(err, ProtocolError::NoResponse));
}
