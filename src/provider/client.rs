//! PokeAPI HTTP client.

use async_trait::async_trait;
use url::Url;

use crate::config::ProviderConfig;
use crate::observability::metrics;
use crate::provider::types::{PokemonResponse, ProviderError, ProviderResult, StatRecord};

/// Source of per-Pokémon stat records.
#[async_trait]
pub trait StatProvider: Send + Sync {
    /// Fetch the stats for an already-normalized name.
    async fn fetch_stats(&self, slug: &str) -> ProviderResult<Vec<StatRecord>>;
}

/// `reqwest`-backed client for `GET {base_url}/pokemon/{slug}`.
///
/// No timeout and no retries: a hung lookup only stalls the request waiting on it.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl PokeApiClient {
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ProviderError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidBaseUrl(config.base_url.clone()));
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Lookup URL for a slug. The slug is one escaped path segment.
    pub fn pokemon_url(&self, slug: &str) -> ProviderResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("pokemon")
            .push(slug);
        Ok(url)
    }
}

#[async_trait]
impl StatProvider for PokeApiClient {
    async fn fetch_stats(&self, slug: &str) -> ProviderResult<Vec<StatRecord>> {
        let url = self.pokemon_url(slug)?;
        tracing::debug!(url = %url, "Querying stat provider");

        let response = self.client.get(url).send().await.map_err(|e| {
            metrics::record_upstream_error();
            ProviderError::Transport(e.to_string())
        })?;

        let status = response.status();
        metrics::record_upstream_status(status.as_u16());
        if !status.is_success() {
            return Err(ProviderError::NotFound {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let parsed: PokemonResponse =
            serde_json::from_slice(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(parsed.stats)
    }
}
