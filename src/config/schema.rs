//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use std::net::{AddrParseError, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::stats::KeyStyle;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (host and port).
    pub listener: ListenerConfig,

    /// Upstream stat provider settings.
    pub provider: ProviderConfig,

    /// Per-handler behavior flags.
    pub handlers: HandlerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RelayConfig {
    /// Named configurations matching the two known deployments.
    ///
    /// - `standalone`: camelCase keys, stubbed EV profile, bound to 127.0.0.1:8080.
    /// - `hosted`: snake_case keys, live EV profile, env-driven host/port. Same as `Default`.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "standalone" => Some(Self {
                listener: ListenerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 8080,
                },
                handlers: HandlerConfig {
                    key_style: KeyStyle::Camel,
                    ev_profile: HandlerMode::Stubbed,
                },
                ..Self::default()
            }),
            "hosted" => Some(Self::default()),
            _ => None,
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host or IP to bind (e.g., "localhost", "0.0.0.0").
    pub host: String,

    /// TCP port. 0 picks an ephemeral port.
    pub port: u16,
}

impl ListenerConfig {
    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5050,
        }
    }
}

/// Upstream provider (PokeAPI) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL; lookups go to `{base_url}/pokemon/{name}`.
    pub base_url: String,

    /// User-Agent header sent with every lookup.
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            user_agent: concat!("pokestat-relay/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Whether a handler serves fixed data or calls the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerMode {
    Stubbed,
    #[default]
    Live,
}

/// Handler behavior configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Key convention for reshaped stat mappings. Applies to every response.
    pub key_style: KeyStyle,

    /// Source of `evProfile` data.
    pub ev_profile: HandlerMode,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Address for the metrics endpoint, or `None` when metrics are disabled.
    pub fn metrics_listener(&self) -> Result<Option<SocketAddr>, AddrParseError> {
        if !self.metrics_enabled {
            return Ok(None);
        }
        self.metrics_address.parse().map(Some)
    }
}
