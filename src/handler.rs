//! Route handler trait, the per-invocation context, and the handler
//! failure type.

use crate::http::{LambdaEvent, ResponseEnvelope};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;

/// Platform execution context passed through to the handler.
///
/// The router treats this as opaque apart from one side effect: it sets
/// `callback_waits_for_empty_event_loop` to `false` on every invocation so
/// the platform does not hold the invocation open waiting on pending
/// asynchronous work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformContext {
    /// Whether the platform should wait for outstanding asynchronous work
    /// before considering the invocation idle. Platform default is `true`;
    /// the router forces it to `false`.
    pub callback_waits_for_empty_event_loop: bool,
    /// Name of the deployed function.
    pub function_name: String,
    /// Platform-assigned ID for this invocation.
    pub request_id: String,
    /// Remaining platform fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PlatformContext {
    fn default() -> Self {
        Self {
            callback_waits_for_empty_event_loop: true,
            function_name: String::new(),
            request_id: String::new(),
            extra: Map::new(),
        }
    }
}

impl PlatformContext {
    /// Create a context with the given function name and request ID.
    pub fn new(function_name: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            request_id: request_id.into(),
            ..Self::default()
        }
    }
}

/// Per-invocation context handed to the matched handler.
///
/// Constructed fresh for every inbound event and owned exclusively by the
/// in-flight invocation. Handlers may mutate `response` (status code,
/// payload, headers) before returning; the router honors those mutations
/// when rendering the result.
#[derive(Debug)]
pub struct Invocation {
    /// The raw inbound event.
    pub event: LambdaEvent,
    /// The platform execution context.
    pub context: PlatformContext,
    /// The response envelope for this invocation.
    pub response: ResponseEnvelope,
}

/// Route handler invoked for a matched (method, path) pair.
///
/// The resolved value is merged into the invocation's response payload;
/// a returned error is normalized into an error envelope by the router
/// and never propagated raw.
#[async_trait]
pub trait RouteHandler: Send + Sync {
    /// Handle one invocation, producing the payload to merge into the
    /// response envelope.
    async fn invoke(&self, inv: &mut Invocation) -> Result<Value, HandlerError>;
}

/// Boxed future returned by closure-based handlers.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, HandlerError>> + Send + 'a>>;

/// Adapter implementing [`RouteHandler`] for a closure.
pub struct FnHandler<F> {
    f: F,
}

#[async_trait]
impl<F> RouteHandler for FnHandler<F>
where
    F: for<'a> Fn(&'a mut Invocation) -> HandlerFuture<'a> + Send + Sync,
{
    async fn invoke(&self, inv: &mut Invocation) -> Result<Value, HandlerError> {
        (self.f)(inv).await
    }
}

/// Wrap a closure as a boxed route handler.
///
/// ```
/// use lambda_router::prelude::*;
/// use serde_json::json;
///
/// let mut router = Router::with_defaults();
/// router
///     .get(
///         "/ping",
///         handler_fn(|_inv| Box::pin(async { Ok(json!({ "pong": true })) })),
///     )
///     .unwrap();
/// ```
pub fn handler_fn<F>(f: F) -> Box<dyn RouteHandler>
where
    F: for<'a> Fn(&'a mut Invocation) -> HandlerFuture<'a> + Send + Sync + 'static,
{
    Box::new(FnHandler { f })
}

/// Handler failure normalized into an error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    /// Error message, used as the error envelope's payload.
    pub message: String,
    /// Status code for the error envelope.
    pub code: u16,
}

impl HandlerError {
    /// Create a handler error with status 500.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 500,
        }
    }

    /// Create a handler error with a specific status code.
    pub fn with_code(code: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code(404, message)
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code(400, message)
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::bad_request(err.to_string())
    }
}

impl From<std::io::Error> for HandlerError {
    fn from(err: std::io::Error) -> Self {
        HandlerError::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_error_defaults_to_500() {
        let err = HandlerError::new("boom");
        assert_eq!(err.code, 500);
        assert_eq!(err.message, "boom");
        assert_eq!(err.to_string(), "[500] boom");
    }

    #[test]
    fn handler_error_constructors_carry_their_codes() {
        assert_eq!(HandlerError::not_found("missing").code, 404);
        assert_eq!(HandlerError::bad_request("bad").code, 400);
        assert_eq!(HandlerError::with_code(418, "teapot").code, 418);
    }

    #[test]
    fn platform_context_waits_by_default() {
        let context = PlatformContext::default();
        assert!(context.callback_waits_for_empty_event_loop);
    }

    #[test]
    fn platform_context_deserializes_passthrough_fields() {
        let context: PlatformContext = serde_json::from_value(serde_json::json!({
            "callbackWaitsForEmptyEventLoop": true,
            "functionName": "api",
            "requestId": "req-1",
            "memoryLimitInMB": "128",
        }))
        .unwrap();

        assert_eq!(context.function_name, "api");
        assert_eq!(
            context.extra.get("memoryLimitInMB"),
            Some(&Value::String("128".into()))
        );
    }
}
