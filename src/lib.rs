//! # lambda-router
//!
//! A minimal request router for single-entrypoint serverless function
//! invocations. Serverless platforms expose one opaque entrypoint per
//! deployable unit; this crate gives callers per-route registration on
//! top of that entrypoint and guarantees a well-formed response envelope
//! whether the handler succeeds or fails.
//!
//! ## Lifecycle
//!
//! ```text
//! register routes ──► Router::handler() ──► EntryHandler
//!                                               │
//!             platform event ──► lookup ──► run handler ──► envelope
//!                                               │
//!                                  completion callback (exactly once)
//! ```
//!
//! - **Registration** happens during setup, one call per verb
//!   (`get`, `post`, `put`, `del`, `options`); a (method, path) pair can
//!   be bound at most once.
//! - **Invocation** resolves the registry entry for the event's
//!   `(httpMethod, resource)` pair by exact match, runs the handler, and
//!   hands the rendered envelope to the completion callback. Failures are
//!   normalized into a 500 envelope, never raised at the platform.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lambda_router::prelude::*;
//! use serde_json::json;
//!
//! struct GetUser;
//!
//! #[async_trait]
//! impl RouteHandler for GetUser {
//!     async fn invoke(&self, _inv: &mut Invocation) -> Result<serde_json::Value, HandlerError> {
//!         Ok(json!({ "id": 42, "name": "mara" }))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut router = Router::new(RouterConfig::new().header("X-Api-Version", "1"));
//!     router.get("/user", Box::new(GetUser)).unwrap();
//!
//!     let entry = router.handler();
//!     let mut context = PlatformContext::default();
//!     entry
//!         .invoke(LambdaEvent::new("GET", "/user"), &mut context, |_err, response| {
//!             println!("{} {}", u16::from(response.status_code), response.body);
//!         })
//!         .await;
//! }
//! ```

pub mod handler;
pub mod http;
pub mod router;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::handler::{
        handler_fn, HandlerError, HandlerFuture, Invocation, PlatformContext, RouteHandler,
    };
    pub use crate::http::{
        HttpMethod, LambdaEvent, RenderedResponse, ResponseEnvelope, StatusCode,
    };
    pub use crate::router::{EntryHandler, Router, RouterConfig, RouterError};
    pub use async_trait::async_trait;
}

// Re-export for convenience
pub use handler::{HandlerError, Invocation, PlatformContext, RouteHandler};
pub use http::{HttpMethod, LambdaEvent, RenderedResponse, ResponseEnvelope, StatusCode};
pub use router::{EntryHandler, Router, RouterConfig, RouterError};
