//! Provider payload types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `{ "name": ... }` reference used by PokeAPI for linked resources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamedResource {
    pub name: String,
}

/// One entry of a Pokémon's `stats` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatRecord {
    pub stat: NamedResource,
    pub base_stat: i64,
    pub effort: i64,
}

impl StatRecord {
    pub fn new(name: impl Into<String>, base_stat: i64, effort: i64) -> Self {
        Self {
            stat: NamedResource { name: name.into() },
            base_stat,
            effort,
        }
    }
}

/// The subset of `GET /pokemon/{name}` the relay reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonResponse {
    pub stats: Vec<StatRecord>,
}

/// Errors that can occur while querying the provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider answered with a non-success status.
    #[error("provider returned status {status}")]
    NotFound { status: u16 },

    /// Request could not be sent or the body could not be read.
    #[error("{0}")]
    Transport(String),

    /// Body was not the expected shape.
    #[error("invalid provider response: {0}")]
    Decode(String),

    /// Base URL cannot have path segments appended.
    #[error("invalid provider base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
