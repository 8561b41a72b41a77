//! Test helpers for request integration tests.
//!
//! This module provides a mock IPC server for exercising the client
//! end-to-end:
//! - One WebSocket connection per accepted socket, one frame per
//!   connection, reply shape chosen per test
//! - Connection counting (the one-connection-per-request invariant)
//! - Capture of the exact frames the server received

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Map, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

/// Test constant for the shared secret.
pub const TEST_SECRET_KEY: &str = "test-secret-12345";

/// How the mock server answers the single frame it receives.
#[derive(Clone)]
pub enum Reply {
    /// Reply with this value encoded as a JSON text frame.
    Json(Value),
    /// Reply with this exact text frame (not necessarily JSON).
    RawText(String),
    /// Reply with these bytes as a binary frame.
    BinaryJson(Vec<u8>),
    /// Close the connection without replying.
    CloseWithoutReply,
}

/// A running mock IPC server on an ephemeral localhost port.
pub struct MockIpcServer {
    pub port: u16,
    connections: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockIpcServer {
    /// Number of WebSocket connections accepted so far.
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// The first frame the server received, parsed as JSON.
    pub async fn first_received(&self) -> Value {
        self.received
            .lock()
            .await
            .first()
            .cloned()
            .expect("Mock server captured no frame")
    }
}

/// Test helper: Start a mock IPC server answering every request with `reply`.
pub async fn start_mock_server(reply: Reply) -> MockIpcServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let port = listener
        .local_addr()
        .expect("Failed to read mock server address")
        .port();

    let connections = Arc::new(AtomicUsize::new(0));
    let received = Arc::new(Mutex::new(Vec::new()));

    let accept_connections = connections.clone();
    let accept_received = received.clone();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            accept_connections.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(handle_connection(
                stream,
                reply.clone(),
                accept_received.clone(),
            ));
        }
    });

    MockIpcServer {
        port,
        connections,
        received,
    }
}

/// Handle one connection: read one frame, record it, answer per `reply`.
async fn handle_connection(stream: TcpStream, reply: Reply, received: Arc<Mutex<Vec<Value>>>) {
    let mut ws = accept_async(stream)
        .await
        .expect("WebSocket handshake failed");

    let frame = match ws.next().await {
        Some(Ok(Message::Text(text))) => text,
        other => panic!("Mock server expected one text frame, got {other:?}"),
    };

    let envelope: Value =
        serde_json::from_str(frame.as_str()).expect("Client frame was not JSON");
    received.lock().await.push(envelope);

    match reply {
        Reply::Json(value) => {
            let body = serde_json::to_string(&value).expect("Failed to encode reply");
            ws.send(Message::Text(body.into()))
                .await
                .expect("Failed to send reply");
        }
        Reply::RawText(body) => {
            ws.send(Message::Text(body.into()))
                .await
                .expect("Failed to send reply");
        }
        Reply::BinaryJson(bytes) => {
            ws.send(Message::Binary(bytes.into()))
                .await
                .expect("Failed to send reply");
        }
        Reply::CloseWithoutReply => {}
    }

    let _ = ws.close(None).await;
}

/// Test helper: Unwrap a `json!` object literal into envelope data.
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("Test data must be a JSON object, got {other:?}"),
    }
}
