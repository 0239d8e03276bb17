//! `baseStats`: live base stats from the provider.

use async_trait::async_trait;
use serde_json::Value;

use crate::handlers::BASE_STATS;
use crate::protocol::{RelayResult, RequestEnvelope};
use crate::routing::RequestHandler;
use crate::stats::{mapping_to_value, StatField, StatReshaper};

pub struct BaseStatsHandler {
    reshaper: StatReshaper,
}

impl BaseStatsHandler {
    pub fn new(reshaper: StatReshaper) -> Self {
        Self { reshaper }
    }
}

#[async_trait]
impl RequestHandler for BaseStatsHandler {
    fn request_type(&self) -> &'static str {
        BASE_STATS
    }

    async fn handle(&self, request: &RequestEnvelope) -> RelayResult<Value> {
        let stats = self
            .reshaper
            .lookup(request.name_or_empty(), StatField::BaseStat)
            .await?;
        Ok(mapping_to_value(stats))
    }
}
