use crate::ipc::RequestEnvelope;

use common::SecretKey;

use serde_json::{Map, Value, json};

fn data_of(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("Test data must be a JSON object, got {other:?}"),
    }
}

/// **VALUE**: Verifies the exact wire schema of the outbound envelope.
///
/// **WHY THIS MATTERS**: The server dispatches on `endpoint`, hands `data` to the
/// handler, and authorizes on `headers.Authorization`. Any renamed or restructured
/// field breaks every deployment pair at once.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - serde field renames are dropped (e.g. `Authorization` becoming lowercase)
/// - caller data is wrapped, filtered, or reordered into a different shape
/// - the secret is moved out of the headers block
#[test]
fn given_secret_when_envelope_serialized_then_matches_wire_schema() {
    // GIVEN: An envelope for the documented example request
    let secret = SecretKey::new("abc");
    let envelope = RequestEnvelope::new("get_user", data_of(json!({"id": 42})), Some(&secret));

    // WHEN: Serializing for the wire
    let wire = serde_json::to_value(&envelope).expect("Envelope must serialize");

    // THEN: Field-for-field the documented frame
    assert_eq!(
        wire,
        json!({
            "endpoint": "get_user",
            "data": {"id": 42},
            "headers": {"Authorization": "abc"}
        })
    );
}

/// **VALUE**: Verifies that an absent secret serializes as JSON `null`, not as a
/// missing field or empty string.
///
/// **WHY THIS MATTERS**: Servers that tolerate anonymous clients distinguish
/// "no credential offered" (`null`) from "empty credential offered" (`""`).
/// Collapsing the two changes authorization outcomes.
///
/// **BUG THIS CATCHES**: Would catch `skip_serializing_if` creeping onto the
/// Authorization field.
#[test]
fn given_no_secret_when_envelope_serialized_then_authorization_is_null() {
    // GIVEN: An envelope with no secret configured
    let envelope = RequestEnvelope::new("ping", Map::new(), None);

    // WHEN: Serializing for the wire
    let wire = serde_json::to_value(&envelope).expect("Envelope must serialize");

    // THEN: Authorization is explicitly null
    assert_eq!(wire["headers"]["Authorization"], Value::Null);
}

/// **VALUE**: Verifies that Debug-formatting an envelope never shows the secret.
///
/// **WHY THIS MATTERS**: The client logs the outbound envelope at debug level.
/// The redaction on `SecretKey` is useless if the copied-out header value prints
/// in clear through the envelope's Debug impl.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug replacing the manual
/// redacting impl on the header block.
#[test]
fn given_secret_when_envelope_debug_formatted_then_secret_is_redacted() {
    // GIVEN: An envelope with a recognizable secret
    let secret = SecretKey::new("hunter2-token");
    let envelope = RequestEnvelope::new("get_user", data_of(json!({"id": 42})), Some(&secret));

    // WHEN: Debug-formatting, as the request logging does
    let debugged = format!("{:?}", envelope);

    // THEN: The secret value is absent, the rest of the envelope is not
    assert!(!debugged.contains("hunter2"), "Debug must redact the secret");
    assert!(debugged.contains("get_user"), "Endpoint should stay visible");
    assert!(debugged.contains("REDACTED"), "Redaction should be explicit");
}
