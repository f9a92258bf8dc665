//! Inbound platform event and the HTTP method routing key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// HTTP method accepted by the route registry.
///
/// This is a closed set: the registry only routes on these verbs, and
/// anything else in an inbound event is treated as a route miss rather
/// than silently defaulting to one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
            HttpMethod::Options => write!(f, "OPTIONS"),
        }
    }
}

/// The event named a verb the router does not route on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

/// Inbound invocation event as delivered by the platform.
///
/// Only `httpMethod` and `resource` participate in routing; every other
/// field the platform attaches rides along in `extra` and reaches the
/// matched handler untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LambdaEvent {
    /// HTTP verb of the request that produced this event.
    #[serde(rename = "httpMethod")]
    pub http_method: String,
    /// Exact resource path used as the lookup key.
    pub resource: String,
    /// Passthrough platform fields (query parameters, body, headers, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LambdaEvent {
    /// Create an event with the given method and resource path.
    pub fn new(method: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            resource: resource.into(),
            extra: Map::new(),
        }
    }

    /// Attach a passthrough field.
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Get a passthrough field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Parse the event's verb against the routing set.
    pub fn method(&self) -> Result<HttpMethod, UnknownMethod> {
        self.http_method.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_from_str_accepts_the_closed_set() {
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("PUT".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
        assert_eq!("DELETE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert_eq!("OPTIONS".parse::<HttpMethod>().unwrap(), HttpMethod::Options);
    }

    #[test]
    fn method_from_str_rejects_unknown_and_lowercase_verbs() {
        assert!("PATCH".parse::<HttpMethod>().is_err());
        assert!("get".parse::<HttpMethod>().is_err());
        assert!("".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn method_display_round_trips() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Options,
        ] {
            assert_eq!(method.to_string().parse::<HttpMethod>().unwrap(), method);
        }
    }

    #[test]
    fn event_preserves_passthrough_fields() {
        let event: LambdaEvent = serde_json::from_value(json!({
            "httpMethod": "GET",
            "resource": "/foo",
            "queryStringParameters": { "page": "2" },
        }))
        .unwrap();

        assert_eq!(event.method().unwrap(), HttpMethod::Get);
        assert_eq!(event.resource, "/foo");
        assert_eq!(
            event.get("queryStringParameters"),
            Some(&json!({ "page": "2" }))
        );
    }
}
