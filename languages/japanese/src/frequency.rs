use std::collections::HashMap;
use std::path::Path;

use yomu_core::{FrequencyRecord, FrequencyStore, LoadError};

use crate::kana::katakana_to_hiragana;

/// Frequency list keyed by hiragana-folded spelling (and reading, when the
/// source gives one)
#[derive(Debug, Clone)]
pub struct FrequencyList {
    name: String,
    active: bool,
    entries: HashMap<String, Vec<FrequencyRecord>>,
}

impl FrequencyList {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active: true,
            entries: HashMap::new(),
        }
    }

    pub fn from_pairs<'a>(name: &str, pairs: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut list = Self::new(name);
        for (spelling, rank) in pairs {
            list.insert(spelling, None, rank);
        }
        list
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    fn insert(&mut self, spelling: &str, reading: Option<&str>, rank: u32) {
        let record = FrequencyRecord {
            spelling: spelling.to_string(),
            rank,
        };
        let keys = std::iter::once(spelling).chain(reading.filter(|r| *r != spelling));
        for key in keys {
            self.entries
                .entry(katakana_to_hiragana(key))
                .or_default()
                .push(record.clone());
        }
    }

    /// Parse TSV data (`spelling\trank[\treading]` per line)
    pub fn from_tsv(name: &str, content: &str) -> Self {
        let mut list = Self::new(name);
        let mut skipped = 0usize;

        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let parts: Vec<&str> = line.split('\t').collect();
            match (parts.first(), parts.get(1).and_then(|r| r.trim().parse::<u32>().ok())) {
                (Some(spelling), Some(rank)) if !spelling.is_empty() => {
                    list.insert(spelling, parts.get(2).copied(), rank);
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!("{}: skipped {} malformed frequency lines", name, skipped);
        }
        list
    }

    /// Load frequency data from a TSV file
    pub fn load_from_file(name: &str, path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }
        tracing::info!("Loading frequency list from file: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let list = Self::from_tsv(name, &content);
        tracing::info!("Loaded {} frequency keys", list.entries.len());
        Ok(list)
    }
}

impl FrequencyStore for FrequencyList {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn try_get(&self, key: &str) -> Option<&[FrequencyRecord]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}
