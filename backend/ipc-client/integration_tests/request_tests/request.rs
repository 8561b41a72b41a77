use crate::request_tests::helpers::{
    Reply, TEST_SECRET_KEY, object, start_mock_server,
};

use common::SecretKey;
use ipc_client::error::IpcError;
use ipc_client::ipc::IpcClient;

use serde_json::json;

/// **VALUE**: Verifies the full round-trip: connect, send, receive, decode.
///
/// **WHY THIS MATTERS**: This is the one operation the client exists for. If the
/// reply object comes back with any field changed, every embedding application
/// reads wrong data.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The reply frame is returned undecoded or re-wrapped
/// - Frame order is confused (client reading its own echo)
/// - The decode step loses or renames fields
#[tokio::test]
async fn given_replying_server_when_request_then_returns_reply_field_for_field() {
    // GIVEN: A server replying with a fixed JSON object
    let reply = json!({"id": 42, "name": "Tester", "roles": ["admin"]});
    let server = start_mock_server(Reply::Json(reply.clone())).await;

    let client = IpcClient::builder()
        .with_host("127.0.0.1")
        .with_port(server.port)
        .with_secret_key(SecretKey::new(TEST_SECRET_KEY))
        .build();

    // WHEN: Making a request
    let result = client
        .request("get_user", object(json!({"id": 42})))
        .await
        .expect("Request should succeed");

    // THEN: The decoded reply equals the server's object exactly
    assert_eq!(result, reply);
}

/// **VALUE**: Verifies the exact frame the server receives on the wire.
///
/// **WHY THIS MATTERS**: The envelope schema is the protocol contract; the server
/// dispatches on `endpoint`, passes `data` through, and authorizes on
/// `headers.Authorization`. This pins the documented concrete example:
/// `request("get_user", id=42)` with secret `"abc"`.
///
/// **BUG THIS CATCHES**: Would catch any drift between the serializer and the
/// wire (extra fields, renamed keys, data wrapped in another layer).
#[tokio::test]
async fn given_configured_secret_when_request_then_wire_frame_matches_schema() {
    // GIVEN: A capturing server and a client with secret "abc"
    let server = start_mock_server(Reply::Json(json!({"ok": true}))).await;
    let client = IpcClient::builder()
        .with_host("127.0.0.1")
        .with_port(server.port)
        .with_secret_key(SecretKey::new("abc"))
        .build();

    // WHEN: Making the documented example request
    client
        .request("get_user", object(json!({"id": 42})))
        .await
        .expect("Request should succeed");

    // THEN: The server saw exactly the documented frame
    assert_eq!(
        server.first_received().await,
        json!({
            "endpoint": "get_user",
            "data": {"id": 42},
            "headers": {"Authorization": "abc"}
        })
    );
}

/// **VALUE**: Verifies that a client without a secret sends `Authorization: null`.
///
/// **WHY THIS MATTERS**: A missing secret is accepted silently by contract; the
/// wire must say "no credential" explicitly so the server's policy, not the
/// client's, decides the outcome.
///
/// **BUG THIS CATCHES**: Would catch the header field being omitted or defaulted
/// to an empty string when no secret is configured.
#[tokio::test]
async fn given_no_secret_when_request_then_authorization_is_null_on_wire() {
    // GIVEN: A capturing server and a secretless client
    let server = start_mock_server(Reply::Json(json!({"ok": true}))).await;
    let client = IpcClient::builder()
        .with_host("127.0.0.1")
        .with_port(server.port)
        .build();

    // WHEN: Making a request
    client
        .request("ping", object(json!({})))
        .await
        .expect("Request should succeed");

    // THEN: Authorization is JSON null
    let received = server.first_received().await;
    assert_eq!(received["headers"]["Authorization"], serde_json::Value::Null);
}

/// **VALUE**: Verifies one-connection-per-request across sequential identical calls.
///
/// **WHY THIS MATTERS**: The resource model is "open, use, close" with nothing
/// shared between calls. Accidental connection reuse would change server-side
/// accounting and break servers that close after each reply.
///
/// **BUG THIS CATCHES**: Would catch a cached connection or handle sneaking into
/// the client, and any nondeterminism between identical calls.
#[tokio::test]
async fn given_two_sequential_requests_when_same_client_then_two_connections() {
    // GIVEN: A deterministic server
    let reply = json!({"pong": true});
    let server = start_mock_server(Reply::Json(reply.clone())).await;
    let client = IpcClient::builder()
        .with_host("127.0.0.1")
        .with_port(server.port)
        .with_secret_key(SecretKey::new(TEST_SECRET_KEY))
        .build();

    // WHEN: Making the same request twice
    let first = client
        .request("ping", object(json!({})))
        .await
        .expect("First request should succeed");
    let second = client
        .request("ping", object(json!({})))
        .await
        .expect("Second request should succeed");

    // THEN: Identical results, distinct connections
    assert_eq!(first, second);
    assert_eq!(first, reply);
    assert_eq!(
        server.connection_count(),
        2,
        "Each request must open its own connection"
    );
}

/// **VALUE**: Verifies that concurrent requests interleave freely, each on its own
/// connection.
///
/// **WHY THIS MATTERS**: The concurrency contract is independent schedulability:
/// no shared connection, no multiplexing, no queuing. A hidden shared resource
/// would serialize callers or cross-deliver replies.
///
/// **BUG THIS CATCHES**: Would catch a mutex or shared socket introduced into
/// `request`, and replies delivered to the wrong caller.
#[tokio::test]
async fn given_concurrent_requests_when_same_client_then_each_opens_own_connection() {
    // GIVEN: A deterministic server and one shared client value
    let server = start_mock_server(Reply::Json(json!({"ok": true}))).await;
    let client = IpcClient::builder()
        .with_host("127.0.0.1")
        .with_port(server.port)
        .with_secret_key(SecretKey::new(TEST_SECRET_KEY))
        .build();

    // WHEN: Issuing three requests concurrently
    let (first, second, third) = tokio::join!(
        client.request("a", object(json!({"n": 1}))),
        client.request("b", object(json!({"n": 2}))),
        client.request("c", object(json!({"n": 3}))),
    );

    // THEN: All complete, one connection each
    first.expect("First concurrent request should succeed");
    second.expect("Second concurrent request should succeed");
    third.expect("Third concurrent request should succeed");
    assert_eq!(server.connection_count(), 3);
}

/// **VALUE**: Verifies that dialing a dead port fails fast with a connection error.
///
/// **WHY THIS MATTERS**: With no listener the client must surface the refusal to
/// the caller - and must do so in bounded time, since the client itself applies
/// no timeout anywhere.
///
/// **BUG THIS CATCHES**: Would catch refusals being swallowed, retried, or hung
/// on instead of propagated.
#[tokio::test]
async fn given_nothing_listening_when_request_then_connection_error_in_bounded_time() {
    // GIVEN: An ephemeral port with nothing listening on it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to reserve a port");
    let dead_port = listener
        .local_addr()
        .expect("Failed to read reserved address")
        .port();
    drop(listener);

    let client = IpcClient::builder()
        .with_host("127.0.0.1")
        .with_port(dead_port)
        .build();

    // WHEN: Making a request, under a generous external deadline
    let result = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        client.request("ping", object(json!({}))),
    )
    .await
    .expect("Request must not hang on a refused connection");

    // THEN: A connection error reaches the caller
    match result.expect_err("Request should fail with nothing listening") {
        IpcError::Connection { .. } => {}
        other => panic!("Expected Connection error, got {other}"),
    }
}

/// **VALUE**: Verifies the accepted-but-undialable configuration: port segment
/// requested, no port configured.
///
/// **WHY THIS MATTERS**: Construction accepts this silently by contract, so the
/// failure must surface at request time, deterministically, as a connection
/// error - never as a dial of some default port.
///
/// **BUG THIS CATCHES**: Would catch the empty port segment resolving to a
/// scheme-default port and silently connecting somewhere unintended.
#[tokio::test]
async fn given_missing_port_when_request_then_connection_error() {
    // GIVEN: A client wanting an explicit port but never given one
    let client = IpcClient::builder().with_host("127.0.0.1").build();

    // WHEN: Making a request
    let result = client.request("ping", object(json!({}))).await;

    // THEN: Connection error naming the underivable target
    match result.expect_err("Request should fail without a port") {
        IpcError::Connection { message, .. } => {
            assert!(
                message.contains("no port configured"),
                "Error should name the missing port, got: {message}"
            );
        }
        other => panic!("Expected Connection error, got {other}"),
    }
}

/// **VALUE**: Verifies that a connection closed before any reply is a protocol
/// error, not a hang or a decode error.
///
/// **WHY THIS MATTERS**: Servers crash mid-request. The caller needs to know the
/// request may or may not have been processed - which is exactly what a protocol
/// error (versus a connection refusal) communicates.
///
/// **BUG THIS CATCHES**: Would catch the close frame being misread as a reply, or
/// the stream end leaving the client waiting forever.
#[tokio::test]
async fn given_close_without_reply_when_request_then_protocol_error() {
    // GIVEN: A server that accepts the frame and closes without replying
    let server = start_mock_server(Reply::CloseWithoutReply).await;
    let client = IpcClient::builder()
        .with_host("127.0.0.1")
        .with_port(server.port)
        .with_secret_key(SecretKey::new(TEST_SECRET_KEY))
        .build();

    // WHEN: Making a request
    let result = client.request("ping", object(json!({}))).await;

    // THEN: Protocol error
    match result.expect_err("Request should fail without a reply") {
        IpcError::Protocol { .. } => {}
        other => panic!("Expected Protocol error, got {other}"),
    }
}

/// **VALUE**: Verifies that an undecodable reply is a decode error.
///
/// **WHY THIS MATTERS**: The contract is "decode the received frame into a
/// structured value". A server bug that replies with plain text must surface as
/// a decode failure carrying the parser's message, not as a panic or as the raw
/// text masquerading as data.
///
/// **BUG THIS CATCHES**: Would catch the reply being passed through unparsed.
#[tokio::test]
async fn given_non_json_reply_when_request_then_decode_error() {
    // GIVEN: A server replying with a non-JSON text frame
    let server = start_mock_server(Reply::RawText(String::from("pong"))).await;
    let client = IpcClient::builder()
        .with_host("127.0.0.1")
        .with_port(server.port)
        .with_secret_key(SecretKey::new(TEST_SECRET_KEY))
        .build();

    // WHEN: Making a request
    let result = client.request("ping", object(json!({}))).await;

    // THEN: Decode error
    match result.expect_err("Request should fail on a non-JSON reply") {
        IpcError::Decode { .. } => {}
        other => panic!("Expected Decode error, got {other}"),
    }
}

/// **VALUE**: Verifies that a JSON reply in a binary frame decodes like a text one.
///
/// **WHY THIS MATTERS**: Server implementations differ on framing; some send JSON
/// as binary. Accepting both framings keeps the client interoperable without any
/// configuration.
///
/// **BUG THIS CATCHES**: Would catch binary frames being rejected as unexpected
/// frame kinds.
#[tokio::test]
async fn given_binary_json_reply_when_request_then_decodes() {
    // GIVEN: A server replying with JSON bytes in a binary frame
    let server =
        start_mock_server(Reply::BinaryJson(br#"{"ok": true}"#.to_vec())).await;
    let client = IpcClient::builder()
        .with_host("127.0.0.1")
        .with_port(server.port)
        .with_secret_key(SecretKey::new(TEST_SECRET_KEY))
        .build();

    // WHEN: Making a request
    let result = client
        .request("ping", object(json!({})))
        .await
        .expect("Binary JSON reply should decode");

    // THEN: Decoded like any text frame
    assert_eq!(result, json!({"ok": true}));
}
