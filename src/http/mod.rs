//! Wire-level types shared between the platform and the router.

mod envelope;
mod event;

pub use envelope::{RenderedResponse, ResponseEnvelope, StatusCode};
pub use event::{HttpMethod, LambdaEvent, UnknownMethod};
