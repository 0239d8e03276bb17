//! Stat reshaping.
//!
//! # Data Flow
//! ```text
//! client name ("  Pikachu ")
//!     → normalize_name ("pikachu")
//!     → StatProvider::fetch_stats
//!     → reshape (keys.rs picks camelCase or snake_case)
//!     → StatMapping { "special_attack": 50, ... }
//! ```

pub mod keys;
pub mod reshape;

pub use keys::KeyStyle;
pub use reshape::{
    mapping_to_value, normalize_name, reshape, StatField, StatMapping, StatReshaper,
};
