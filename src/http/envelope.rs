//! Response envelope accumulated during an invocation and its rendered
//! wire-level form.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const CREATED: StatusCode = StatusCode(201);
    pub const NO_CONTENT: StatusCode = StatusCode(204);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const UNAUTHORIZED: StatusCode = StatusCode(401);
    pub const FORBIDDEN: StatusCode = StatusCode(403);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    /// Check if the status code indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// Check if the status code indicates a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// Check if the status code indicates a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::OK
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

/// Mutable response accumulator for a single invocation.
///
/// The router builds one envelope per matched invocation, hands it to the
/// handler through the invocation context, and merges the handler's
/// resolved payload into it afterwards. Handlers may mutate the envelope
/// they were given (status code included) before returning; those
/// mutations are honored in the rendered result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    /// Response payload, serialized into the body on render.
    pub payload: Value,
    /// HTTP status code, defaults to 200.
    pub status_code: StatusCode,
    /// Headers forwarded verbatim into the rendered result.
    pub headers: HashMap<String, String>,
}

/// Body shape shared by every rendered response.
#[derive(Serialize)]
struct EnvelopeBody<'a> {
    message: &'static str,
    payload: &'a Value,
}

impl ResponseEnvelope {
    /// Create an envelope with an empty object payload and status 200.
    pub fn new() -> Self {
        Self {
            payload: Value::Object(serde_json::Map::new()),
            status_code: StatusCode::OK,
            headers: HashMap::new(),
        }
    }

    /// Create an envelope with the given payload and status code.
    pub fn with_status(payload: Value, status_code: impl Into<StatusCode>) -> Self {
        Self {
            payload,
            status_code: status_code.into(),
            headers: HashMap::new(),
        }
    }

    /// Add a header to the envelope.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Render the wire-level result.
    ///
    /// Pure: the envelope is not mutated. The body is the fixed-shape
    /// `{ message, payload }` structure where `message` is `"success"`
    /// for 2xx status codes and `"error"` otherwise.
    pub fn render(&self) -> RenderedResponse {
        let body = EnvelopeBody {
            message: if self.status_code.is_success() {
                "success"
            } else {
                "error"
            },
            payload: &self.payload,
        };
        let body = serde_json::to_string(&body)
            .unwrap_or_else(|_| r#"{"message":"error","payload":null}"#.to_string());

        RenderedResponse {
            headers: self.headers.clone(),
            status_code: self.status_code,
            body,
        }
    }
}

impl Default for ResponseEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

/// Final wire-level result handed to the platform's completion callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedResponse {
    /// Headers carried over from the envelope.
    pub headers: HashMap<String, String>,
    /// HTTP status code.
    #[serde(rename = "statusCode")]
    pub status_code: StatusCode,
    /// Serialized `{ message, payload }` body.
    pub body: String,
}

impl RenderedResponse {
    /// Parse the serialized body back into JSON.
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
