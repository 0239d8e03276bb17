//! Request handler capability.
//!
//! # Design Decisions
//! - One handler per request `type`, registered with the router
//! - Handlers return data or a `RelayError`; they never build wire envelopes
//! - Error conversion happens once, in the router

use async_trait::async_trait;
use serde_json::Value;

use crate::protocol::{RelayResult, RequestEnvelope, RESPONSE_SUFFIX};

/// Handles one request type.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// The `type` value this handler serves (exact, case-sensitive).
    fn request_type(&self) -> &'static str;

    /// The `type` of a success reply.
    fn response_type(&self) -> String {
        format!("{}{}", self.request_type(), RESPONSE_SUFFIX)
    }

    /// Produce the reply `data` for a request.
    async fn handle(&self, request: &RequestEnvelope) -> RelayResult<Value>;
}
