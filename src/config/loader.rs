//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `listener.host`.
pub const HOST_ENV: &str = "HOST";
/// Environment variable overriding `listener.port`.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {value:?}")]
    Env { name: &'static str, value: String },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse configuration from TOML text. Not validated: overrides come first.
pub fn parse_config(content: &str) -> Result<RelayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from a TOML file. Not validated: overrides come first.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Apply `HOST` / `PORT` overrides using the given variable lookup.
///
/// Unset or empty variables leave the configured value alone.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(HOST_ENV).filter(|h| !h.trim().is_empty()) {
        config.listener.host = host.trim().to_string();
    }

    if let Some(port) = lookup(PORT_ENV).filter(|p| !p.trim().is_empty()) {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::Env {
            name: PORT_ENV,
            value: port.clone(),
        })?;
    }

    Ok(())
}

/// Validate a config once every layer has been applied.
pub fn finalize(config: RelayConfig) -> Result<RelayConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply overrides from the process environment.
pub fn apply_process_env(config: &mut RelayConfig) -> Result<(), ConfigError> {
    apply_env_overrides(config, |name| std::env::var(name).ok())
}
