//! Route registration surface and the invocation entrypoint.

mod config;
mod entry;
mod registry;

pub use config::{ErrorHook, InvokeHook, RouterConfig};
pub use entry::EntryHandler;
pub use registry::{RouteRegistry, RouterError};

use crate::handler::RouteHandler;
use crate::http::HttpMethod;

/// Request router for a single-entrypoint serverless function.
///
/// Routes are registered per verb against exact resource paths during
/// setup; [`Router::handler`] then freezes the registry into a shareable
/// [`EntryHandler`]. Consuming the router on freeze is what guarantees
/// registration and invocation never interleave.
#[derive(Debug)]
pub struct Router {
    registry: RouteRegistry,
    config: RouterConfig,
}

impl Router {
    /// Create a router with the given configuration and no routes.
    pub fn new(config: RouterConfig) -> Self {
        Self {
            registry: RouteRegistry::new(),
            config,
        }
    }

    /// Create a router with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RouterConfig::default())
    }

    /// Register a GET route.
    pub fn get(
        &mut self,
        path: impl Into<String>,
        handler: Box<dyn RouteHandler>,
    ) -> Result<(), RouterError> {
        self.registry.insert(HttpMethod::Get, path, handler)
    }

    /// Register a POST route.
    pub fn post(
        &mut self,
        path: impl Into<String>,
        handler: Box<dyn RouteHandler>,
    ) -> Result<(), RouterError> {
        self.registry.insert(HttpMethod::Post, path, handler)
    }

    /// Register a PUT route.
    pub fn put(
        &mut self,
        path: impl Into<String>,
        handler: Box<dyn RouteHandler>,
    ) -> Result<(), RouterError> {
        self.registry.insert(HttpMethod::Put, path, handler)
    }

    /// Register a DELETE route.
    pub fn del(
        &mut self,
        path: impl Into<String>,
        handler: Box<dyn RouteHandler>,
    ) -> Result<(), RouterError> {
        self.registry.insert(HttpMethod::Delete, path, handler)
    }

    /// Register an OPTIONS route.
    pub fn options(
        &mut self,
        path: impl Into<String>,
        handler: Box<dyn RouteHandler>,
    ) -> Result<(), RouterError> {
        self.registry.insert(HttpMethod::Options, path, handler)
    }

    /// Freeze the router into the platform-facing entrypoint.
    pub fn handler(self) -> EntryHandler {
        EntryHandler::new(self)
    }

    /// The route registry.
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// The router configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handler_fn;
    use serde_json::json;

    fn noop() -> Box<dyn RouteHandler> {
        handler_fn(|_inv| Box::pin(async { Ok(json!({})) }))
    }

    #[test]
    fn verb_methods_register_under_their_fixed_verbs() {
        let mut router = Router::with_defaults();
        router.get("/r", noop()).unwrap();
        router.post("/r", noop()).unwrap();
        router.put("/r", noop()).unwrap();
        router.del("/r", noop()).unwrap();
        router.options("/r", noop()).unwrap();

        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Options,
        ] {
            assert!(router.registry().contains(method, "/r"));
        }
    }

    #[test]
    fn duplicate_verb_and_path_fails() {
        let mut router = Router::with_defaults();
        router.get("/r", noop()).unwrap();
        assert!(router.get("/r", noop()).is_err());
        assert_eq!(router.registry().len(), 1);
    }
}
