use common::SecretKey;

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// The single outbound wire entity: one envelope per request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    pub endpoint: String,
    pub data: Map<String, Value>,
    pub headers: RequestHeaders,
}

/// Header block of the envelope.
///
/// `Authorization` carries the configured secret verbatim, or JSON `null`
/// when no secret is configured - the server decides what to do about
/// that.
#[derive(Clone, Serialize)]
pub struct RequestHeaders {
    #[serde(rename = "Authorization")]
    pub authorization: Option<String>,
}

impl RequestEnvelope {
    /// Assemble an envelope from the caller's endpoint and data plus the
    /// client's configured credential.
    pub fn new(
        endpoint: impl Into<String>,
        data: Map<String, Value>,
        secret_key: Option<&SecretKey>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            data,
            headers: RequestHeaders {
                authorization: secret_key.map(|key| key.expose().to_owned()),
            },
        }
    }

    /// Encode the envelope as the JSON text frame body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// Manual Debug so a logged envelope never shows the credential.
impl fmt::Debug for RequestHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let authorization = match self.authorization {
            Some(_) => "[REDACTED]",
            None => "None",
        };
        f.debug_struct("RequestHeaders")
            .field("authorization", &authorization)
            .finish()
    }
}
