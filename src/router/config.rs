//! Router configuration: default headers and lifecycle hooks.

use crate::handler::HandlerError;
use crate::http::{LambdaEvent, ResponseEnvelope};
use std::collections::HashMap;

/// Hook invoked when a route match is found, before handler execution.
///
/// The result value is ignored on success; an `Err` takes the same
/// failure path as a handler error.
pub type InvokeHook = Box<dyn Fn(&LambdaEvent) -> Result<(), HandlerError> + Send + Sync>;

/// Hook invoked on handler failure, before the completion callback.
///
/// Returning `Some` replaces the error envelope the router would
/// otherwise render.
pub type ErrorHook =
    Box<dyn Fn(&LambdaEvent, &HandlerError) -> Option<ResponseEnvelope> + Send + Sync>;

/// Configuration for a [`Router`](crate::router::Router). Set once at
/// construction; read-only during invocation.
#[derive(Default)]
pub struct RouterConfig {
    /// Headers applied to every successful envelope.
    pub headers: HashMap<String, String>,
    /// Optional hook fired on each route match.
    pub on_invoke: Option<InvokeHook>,
    /// Optional hook fired on each handler failure.
    pub on_error: Option<ErrorHook>,
}

impl RouterConfig {
    /// Create a config with no headers and no hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a default header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Replace the default header map.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Set the route-match hook.
    pub fn on_invoke<F>(mut self, hook: F) -> Self
    where
        F: Fn(&LambdaEvent) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.on_invoke = Some(Box::new(hook));
        self
    }

    /// Set the handler-failure hook.
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&LambdaEvent, &HandlerError) -> Option<ResponseEnvelope> + Send + Sync + 'static,
    {
        self.on_error = Some(Box::new(hook));
        self
    }
}

impl std::fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterConfig")
            .field("headers", &self.headers)
            .field("on_invoke", &self.on_invoke.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_headers() {
        let config = RouterConfig::new()
            .header("Authorization", "foo")
            .header("X-Api-Version", "1");

        assert_eq!(config.headers.len(), 2);
        assert_eq!(config.headers.get("Authorization").unwrap(), "foo");
    }

    #[test]
    fn hooks_default_to_unset() {
        let config = RouterConfig::new();
        assert!(config.on_invoke.is_none());
        assert!(config.on_error.is_none());
    }

    #[test]
    fn debug_reports_hook_presence_not_contents() {
        let config = RouterConfig::new().on_invoke(|_event| Ok(()));
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("on_invoke: true"));
        assert!(rendered.contains("on_error: false"));
    }
}
