//! Request lookup and dispatch.
//!
//! # Responsibilities
//! - Store registered handlers keyed by request type
//! - Dispatch a request and await its handler
//! - Convert every outcome into exactly one reply envelope
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(1) lookup via HashMap
//! - Explicit `Invalid request type` reply rather than a silent default

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::observability::metrics;
use crate::protocol::{RelayError, RequestEnvelope, ResponseEnvelope};
use crate::routing::handler::RequestHandler;

/// Registration table mapping request type → handler.
#[derive(Default, Clone)]
pub struct MessageRouter {
    handlers: HashMap<&'static str, Arc<dyn RequestHandler>>,
}

impl MessageRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, returning any handler it replaced.
    pub fn register(&mut self, handler: Arc<dyn RequestHandler>) -> Option<Arc<dyn RequestHandler>> {
        self.handlers.insert(handler.request_type(), handler)
    }

    /// Builder-style `register`.
    pub fn with_handler<H: RequestHandler + 'static>(mut self, handler: H) -> Self {
        self.register(Arc::new(handler));
        self
    }

    /// Whether a handler is registered for `request_type`.
    pub fn handles(&self, request_type: &str) -> bool {
        self.handlers.contains_key(request_type)
    }

    /// Registered request types, sorted.
    pub fn request_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.handlers.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Dispatch a request. Always yields a reply; failures become `error` replies.
    pub async fn dispatch(&self, request: RequestEnvelope) -> ResponseEnvelope {
        let start = Instant::now();

        let handler = request
            .request_type
            .as_deref()
            .and_then(|request_type| self.handlers.get(request_type))
            .cloned();

        let Some(handler) = handler else {
            tracing::debug!(request_type = ?request.request_type, "Unknown request type");
            let err = RelayError::UnknownRequestType(request.request_type);
            metrics::record_request("unknown", err.kind(), start);
            return ResponseEnvelope::error(request.request_id, &err);
        };

        let request_type = handler.request_type();
        match handler.handle(&request).await {
            Ok(data) => {
                tracing::debug!(request_type, request_id = ?request.request_id, "Request handled");
                metrics::record_request(request_type, "ok", start);
                ResponseEnvelope::success(
                    handler.response_type(),
                    request.request_id,
                    request.name,
                    data,
                )
            }
            Err(err) => {
                tracing::debug!(
                    request_type,
                    request_id = ?request.request_id,
                    error = %err,
                    "Request failed"
                );
                metrics::record_request(request_type, err.kind(), start);
                ResponseEnvelope::error(request.request_id, &err)
            }
        }
    }
}

impl std::fmt::Debug for MessageRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageRouter")
            .field("request_types", &self.request_types())
            .finish()
    }
}
