//! Request handlers and the standard registration table.
//!
//! | type        | handler             | data source                    |
//! |-------------|---------------------|--------------------------------|
//! | `baseStats` | `BaseStatsHandler`  | provider `base_stat`           |
//! | `holdItems` | `HoldItemsHandler`  | fixed list                     |
//! | `evProfile` | `EvProfileHandler`  | fixed or provider `effort`     |

pub mod base_stats;
pub mod ev_profile;
pub mod hold_items;

use std::sync::Arc;

pub use base_stats::BaseStatsHandler;
pub use ev_profile::EvProfileHandler;
pub use hold_items::HoldItemsHandler;

use crate::config::HandlerConfig;
use crate::provider::StatProvider;
use crate::routing::MessageRouter;
use crate::stats::StatReshaper;

pub const BASE_STATS: &str = "baseStats";
pub const HOLD_ITEMS: &str = "holdItems";
pub const EV_PROFILE: &str = "evProfile";

/// Router with the three standard handlers, configured per `config`.
pub fn build_router(config: &HandlerConfig, provider: Arc<dyn StatProvider>) -> MessageRouter {
    let reshaper = StatReshaper::new(provider, config.key_style);

    tracing::debug!(
        key_style = config.key_style.as_str(),
        ev_profile = ?config.ev_profile,
        "Registering request handlers"
    );

    MessageRouter::new()
        .with_handler(BaseStatsHandler::new(reshaper.clone()))
        .with_handler(HoldItemsHandler)
        .with_handler(EvProfileHandler::from_mode(config.ev_profile, reshaper))
}
