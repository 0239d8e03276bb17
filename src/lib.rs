//! Pokémon stat relay library.
//!
//! A WebSocket relay that answers JSON requests (`baseStats`, `holdItems`,
//! `evProfile`) with replies correlated by `requestId`.

pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod protocol;
pub mod provider;
pub mod routing;
pub mod stats;

pub use config::schema::RelayConfig;
pub use http::{RelayServer, RunningServer};
pub use lifecycle::Shutdown;
pub use protocol::{RelayError, RequestEnvelope, ResponseEnvelope};
