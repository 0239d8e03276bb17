//! Stat key normalization.
//!
//! PokeAPI stat names are hyphen-separated lowercase words (`special-attack`).
//! A deployment picks one output convention; a single response never mixes them.

use serde::{Deserialize, Serialize};

/// Key convention for reshaped stat mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStyle {
    /// `special-attack` → `specialAttack`
    Camel,
    /// `special-attack` → `special_attack`
    #[default]
    Snake,
}

impl KeyStyle {
    /// Normalize a provider stat name.
    pub fn normalize(self, stat_name: &str) -> String {
        match self {
            KeyStyle::Camel => to_camel_case(stat_name),
            KeyStyle::Snake => stat_name.replace('-', "_"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KeyStyle::Camel => "camel",
            KeyStyle::Snake => "snake",
        }
    }
}

fn to_camel_case(stat_name: &str) -> String {
    let mut out = String::with_capacity(stat_name.len());
    for (i, word) in stat_name.split('-').enumerate() {
        if i == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
