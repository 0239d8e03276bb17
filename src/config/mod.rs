//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or named preset
//!     → loader.rs (parse & deserialize)
//!     → HOST / PORT environment overrides
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → injected into RelayServer at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{
    apply_env_overrides, apply_process_env, finalize, load_config, parse_config, ConfigError,
};
pub use schema::{
    HandlerConfig, HandlerMode, ListenerConfig, LogFormat, ObservabilityConfig, ProviderConfig,
    RelayConfig,
};
pub use validation::{validate_config, ValidationError};
