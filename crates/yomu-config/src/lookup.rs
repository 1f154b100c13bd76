use std::env;

use serde::{Deserialize, Serialize};

fn default_debounce_ms() -> u64 {
    100
}

fn default_max_search_length() -> usize {
    37
}

fn default_max_deconjugated_matches() -> usize {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Minimum interval between two admitted lookups, 0 disables debouncing
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Characters taken from the lookup position
    #[serde(default = "default_max_search_length")]
    pub max_search_length: usize,
    /// Look up only the leading character in kanji dictionaries
    #[serde(default)]
    pub kanji_mode: bool,
    /// Successful deconjugation-based matches kept per window
    #[serde(default = "default_max_deconjugated_matches")]
    pub max_deconjugated_matches: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_search_length: default_max_search_length(),
            kanji_mode: false,
            max_deconjugated_matches: default_max_deconjugated_matches(),
        }
    }
}

impl LookupConfig {
    pub fn new() -> Self {
        let debounce_ms = env::var("YOMU_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_debounce_ms);

        let max_search_length = env::var("YOMU_MAX_SEARCH_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|len: &usize| *len > 0)
            .unwrap_or_else(default_max_search_length);

        let kanji_mode = env::var("YOMU_KANJI_MODE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Self {
            debounce_ms,
            max_search_length,
            kanji_mode,
            max_deconjugated_matches: default_max_deconjugated_matches(),
        }
    }
}
