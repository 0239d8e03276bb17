//! `holdItems`: fixed item recommendations.
//!
//! Placeholder data until real recommendation logic exists. `name` and
//! `battleType` do not affect the payload.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::handlers::HOLD_ITEMS;
use crate::protocol::{RelayResult, RequestEnvelope};
use crate::routing::RequestHandler;

/// The stub recommendation list.
pub fn recommended_items() -> Value {
    json!([
        { "item": "Leftovers", "justification": "Provides passive healing each turn" },
        { "item": "Choice Scarf", "justification": "Increases speed but locks into one move" }
    ])
}

pub struct HoldItemsHandler;

#[async_trait]
impl RequestHandler for HoldItemsHandler {
    fn request_type(&self) -> &'static str {
        HOLD_ITEMS
    }

    async fn handle(&self, _request: &RequestEnvelope) -> RelayResult<Value> {
        Ok(recommended_items())
    }
}
