//! Single-entrypoint invocation lifecycle.

use crate::handler::{HandlerError, Invocation, PlatformContext};
use crate::http::{LambdaEvent, RenderedResponse, ResponseEnvelope, StatusCode};
use crate::router::Router;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Payload rendered for events with no matching route.
const NOT_FOUND_PAYLOAD: &str = "Resource not found";

/// Frozen, shareable entrypoint produced by [`Router::handler`].
///
/// Cloning is cheap; the registry and configuration behind it are
/// immutable, so one entrypoint can serve any number of logically
/// separate platform activations.
#[derive(Clone)]
pub struct EntryHandler {
    router: Arc<Router>,
}

impl EntryHandler {
    pub(crate) fn new(router: Router) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    /// Process one inbound event end to end.
    ///
    /// The completion callback is invoked exactly once. Its error slot is
    /// always `None`: handler failures are reported through the
    /// envelope's status code, never through the callback's error
    /// channel. The handler await is the sole suspension point.
    pub async fn invoke<F>(&self, event: LambdaEvent, context: &mut PlatformContext, callback: F)
    where
        F: FnOnce(Option<HandlerError>, RenderedResponse),
    {
        // The platform must not hold the invocation open waiting on
        // pending asynchronous work, matched route or not.
        context.callback_waits_for_empty_event_loop = false;

        let handler = event
            .method()
            .ok()
            .and_then(|method| self.router.registry().find(method, &event.resource));

        let Some(handler) = handler else {
            warn!("no route for {} {}", event.http_method, event.resource);
            let envelope = ResponseEnvelope::with_status(
                Value::String(NOT_FOUND_PAYLOAD.into()),
                StatusCode::NOT_FOUND,
            );
            callback(None, envelope.render());
            return;
        };

        debug!("dispatching {} {}", event.http_method, event.resource);

        if let Some(hook) = &self.router.config().on_invoke {
            if let Err(err) = hook(&event) {
                error!("onInvoke hook failed for {}: {}", event.resource, err);
                callback(None, self.error_envelope(&event, err).render());
                return;
            }
        }

        let mut response = ResponseEnvelope::new();
        response.headers = self.router.config().headers.clone();

        // The invocation owns the platform context while the handler
        // runs; it is restored to the caller afterwards so mutations
        // (the wait flag included) remain observable.
        let mut inv = Invocation {
            event,
            context: std::mem::take(context),
            response,
        };

        let outcome = handler.invoke(&mut inv).await;

        let Invocation {
            event,
            context: taken,
            mut response,
        } = inv;
        *context = taken;

        match outcome.and_then(|payload| merge_payload(&mut response, payload)) {
            Ok(()) => callback(None, response.render()),
            Err(err) => {
                error!("handler failed for {}: {}", event.resource, err);
                callback(None, self.error_envelope(&event, err).render());
            }
        }
    }

    /// Build the envelope for a failed invocation, consulting the
    /// `on_error` hook for a replacement if one is configured.
    fn error_envelope(&self, event: &LambdaEvent, err: HandlerError) -> ResponseEnvelope {
        let fallback =
            ResponseEnvelope::with_status(Value::String(err.message.clone()), err.code);

        match &self.router.config().on_error {
            Some(hook) => hook(event, &err).unwrap_or(fallback),
            None => fallback,
        }
    }
}

/// Merge a handler's resolved value into the envelope payload.
///
/// Shallow merge: resolved keys overwrite existing payload keys. `Null`
/// leaves the payload untouched (the handler communicated through the
/// envelope directly). Any other non-object value is a handler bug and
/// takes the failure path, since the merge assumes a mapping.
fn merge_payload(envelope: &mut ResponseEnvelope, resolved: Value) -> Result<(), HandlerError> {
    match resolved {
        Value::Null => Ok(()),
        Value::Object(fields) => {
            match envelope.payload.as_object_mut() {
                Some(payload) => payload.extend(fields),
                None => envelope.payload = Value::Object(fields),
            }
            Ok(())
        }
        other => Err(HandlerError::new(format!(
            "handler resolved a non-object payload: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overwrites_existing_keys() {
        let mut envelope = ResponseEnvelope::new();
        envelope.payload = json!({ "a": 1, "b": 2 });

        merge_payload(&mut envelope, json!({ "b": 3, "c": 4 })).unwrap();

        assert_eq!(envelope.payload, json!({ "a": 1, "b": 3, "c": 4 }));
    }

    #[test]
    fn merge_null_is_a_no_op() {
        let mut envelope = ResponseEnvelope::new();
        envelope.payload = json!({ "kept": true });

        merge_payload(&mut envelope, Value::Null).unwrap();

        assert_eq!(envelope.payload, json!({ "kept": true }));
    }

    #[test]
    fn merge_replaces_a_non_object_payload() {
        let mut envelope = ResponseEnvelope::new();
        envelope.payload = json!("plain text");

        merge_payload(&mut envelope, json!({ "a": 1 })).unwrap();

        assert_eq!(envelope.payload, json!({ "a": 1 }));
    }

    #[test]
    fn merge_rejects_scalars() {
        let mut envelope = ResponseEnvelope::new();
        let err = merge_payload(&mut envelope, json!(42)).unwrap_err();
        assert_eq!(err.code, 500);
    }
}
