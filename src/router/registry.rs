//! Route registry mapping (method, path) pairs to handlers.

use crate::handler::RouteHandler;
use crate::http::HttpMethod;
use std::collections::HashMap;
use tracing::info;

/// Setup-time router error.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// The (method, path) pair is already bound to a handler.
    #[error("a handler is already registered for {method} {path}")]
    DuplicateRoute {
        /// Verb of the conflicting registration.
        method: HttpMethod,
        /// Path of the conflicting registration.
        path: String,
    },
}

/// Registry of routes, keyed by verb and exact resource path.
///
/// A (method, path) pair is bound to at most one handler for the lifetime
/// of the registry; a second registration on the same pair fails and
/// leaves the first handler active. There is no deregistration. All
/// mutation happens during setup, before any dispatch.
#[derive(Default)]
pub struct RouteRegistry {
    routes: HashMap<HttpMethod, HashMap<String, Box<dyn RouteHandler>>>,
}

impl RouteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler to a (method, path) pair.
    pub fn insert(
        &mut self,
        method: HttpMethod,
        path: impl Into<String>,
        handler: Box<dyn RouteHandler>,
    ) -> Result<(), RouterError> {
        let path = path.into();
        let routes = self.routes.entry(method).or_default();

        if routes.contains_key(&path) {
            return Err(RouterError::DuplicateRoute { method, path });
        }

        routes.insert(path.clone(), handler);
        info!("registered route: {} {}", method, path);
        Ok(())
    }

    /// Look up the handler for a (method, path) pair. Exact match only.
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<&dyn RouteHandler> {
        self.routes.get(&method)?.get(path).map(Box::as_ref)
    }

    /// Check whether a (method, path) pair is bound.
    pub fn contains(&self, method: HttpMethod, path: &str) -> bool {
        self.find(method, path).is_some()
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    /// Check whether the registry has no routes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut routes: Vec<String> = self
            .routes
            .iter()
            .flat_map(|(method, paths)| paths.keys().map(move |path| format!("{} {}", method, path)))
            .collect();
        routes.sort();
        f.debug_struct("RouteRegistry")
            .field("routes", &routes)
            .finish()
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
    fn insert_and_find_exact_match() {
        let mut registry = RouteRegistry::new();
        registry.insert(HttpMethod::Get, "/foo", noop()).unwrap();

        assert!(registry.contains(HttpMethod::Get, "/foo"));
        assert!(!registry.contains(HttpMethod::Post, "/foo"));
        assert!(!registry.contains(HttpMethod::Get, "/foo/bar"));
        assert!(!registry.contains(HttpMethod::Get, "/fo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = RouteRegistry::new();
        registry.insert(HttpMethod::Get, "/foo", noop()).unwrap();

        let err = registry.insert(HttpMethod::Get, "/foo", noop()).unwrap_err();
        assert!(matches!(
            err,
            RouterError::DuplicateRoute { method: HttpMethod::Get, ref path } if path == "/foo"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn same_path_different_verbs_coexist() {
        let mut registry = RouteRegistry::new();
        registry.insert(HttpMethod::Get, "/foo", noop()).unwrap();
        registry.insert(HttpMethod::Post, "/foo", noop()).unwrap();
        registry.insert(HttpMethod::Delete, "/foo", noop()).unwrap();

        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn empty_registry_reports_empty() {
        let registry = RouteRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.find(HttpMethod::Get, "/foo").is_none());
    }
}
