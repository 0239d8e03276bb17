//! Upstream stat provider.
//!
//! # Data Flow
//! ```text
//! normalized name
//!     → client.rs (GET {base_url}/pokemon/{name})
//!     → non-2xx: ProviderError::NotFound
//!     → 2xx: decode `stats` → Vec<StatRecord>
//! ```
//!
//! # Design Decisions
//! - `StatProvider` trait is the seam for tests and alternate sources
//! - No caching, no timeout, no retries

pub mod client;
pub mod types;

pub use client::{PokeApiClient, StatProvider};
pub use types::{NamedResource, PokemonResponse, ProviderError, ProviderResult, StatRecord};
