//! `evProfile`: EV yields, either fixed or from the provider.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::HandlerMode;
use crate::handlers::EV_PROFILE;
use crate::protocol::{RelayResult, RequestEnvelope};
use crate::routing::RequestHandler;
use crate::stats::{mapping_to_value, StatField, StatReshaper};

/// The stub six-stat spread.
pub fn stub_profile() -> Value {
    json!({
        "HP": 252,
        "Attack": 0,
        "Defense": 0,
        "SpecialAttack": 252,
        "SpecialDefense": 4,
        "Speed": 0
    })
}

enum Source {
    Stubbed,
    Live(StatReshaper),
}

pub struct EvProfileHandler {
    source: Source,
}

impl EvProfileHandler {
    /// Always answers with [`stub_profile`]; `trainer` is ignored.
    pub fn stubbed() -> Self {
        Self {
            source: Source::Stubbed,
        }
    }

    /// Answers with the provider's `effort` values.
    pub fn live(reshaper: StatReshaper) -> Self {
        Self {
            source: Source::Live(reshaper),
        }
    }

    pub fn from_mode(mode: HandlerMode, reshaper: StatReshaper) -> Self {
        match mode {
            HandlerMode::Stubbed => Self::stubbed(),
            HandlerMode::Live => Self::live(reshaper),
        }
    }

    pub fn mode(&self) -> HandlerMode {
        match self.source {
            Source::Stubbed => HandlerMode::Stubbed,
            Source::Live(_) => HandlerMode::Live,
        }
    }
}

#[async_trait]
impl RequestHandler for EvProfileHandler {
    fn request_type(&self) -> &'static str {
        EV_PROFILE
    }

    async fn handle(&self, request: &RequestEnvelope) -> RelayResult<Value> {
        match &self.source {
            Source::Stubbed => Ok(stub_profile()),
            Source::Live(reshaper) => {
                let effort = reshaper
                    .lookup(request.name_or_empty(), StatField::Effort)
                    .await?;
                Ok(mapping_to_value(effort))
            }
        }
    }
}
