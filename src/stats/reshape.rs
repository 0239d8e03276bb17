//! Reshaping provider stat records into flat mappings.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::protocol::{RelayError, RelayResult};
use crate::provider::{ProviderError, StatProvider, StatRecord};
use crate::stats::keys::KeyStyle;

/// Normalized stat key → value. One entry per distinct stat name.
pub type StatMapping = BTreeMap<String, i64>;

/// Which number of a stat record a query reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    /// `base_stat`, for base-stat queries.
    BaseStat,
    /// `effort`, for EV-profile queries.
    Effort,
}

impl StatField {
    fn pick(self, record: &StatRecord) -> i64 {
        match self {
            StatField::BaseStat => record.base_stat,
            StatField::Effort => record.effort,
        }
    }
}

/// Lookup key for a client-supplied name: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Convert records into a mapping. A repeated stat name keeps its last value.
pub fn reshape(records: &[StatRecord], field: StatField, style: KeyStyle) -> StatMapping {
    records
        .iter()
        .map(|record| (style.normalize(&record.stat.name), field.pick(record)))
        .collect()
}

/// JSON object form of a mapping, used as reply `data`.
pub fn mapping_to_value(mapping: StatMapping) -> Value {
    Value::Object(
        mapping
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect::<Map<String, Value>>(),
    )
}

/// Looks a name up at the provider and reshapes the result.
#[derive(Clone)]
pub struct StatReshaper {
    provider: Arc<dyn StatProvider>,
    style: KeyStyle,
}

impl StatReshaper {
    pub fn new(provider: Arc<dyn StatProvider>, style: KeyStyle) -> Self {
        Self { provider, style }
    }

    pub fn key_style(&self) -> KeyStyle {
        self.style
    }

    /// Fetch and reshape. Every call queries the provider.
    ///
    /// A name that is empty after trimming fails as not-found without a lookup.
    pub async fn lookup(&self, name: &str, field: StatField) -> RelayResult<StatMapping> {
        let slug = normalize_name(name);
        if slug.is_empty() {
            return Err(RelayError::UpstreamNotFound {
                name: name.to_string(),
            });
        }

        let records = self
            .provider
            .fetch_stats(&slug)
            .await
            .map_err(|err| match err {
                ProviderError::NotFound { status } => {
                    tracing::debug!(slug = %slug, status, "Pokemon not found upstream");
                    RelayError::UpstreamNotFound {
                        name: name.to_string(),
                    }
                }
                other => {
                    tracing::warn!(slug = %slug, error = %other, "Stat provider lookup failed");
                    RelayError::UpstreamFailure(other.to_string())
                }
            })?;

        Ok(reshape(&records, field, self.style))
    }
}
