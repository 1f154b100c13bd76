use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use yomu_core::{LoadError, WordClassTable};

#[derive(Debug, Deserialize)]
struct WordClassJson {
    spelling: String,
    #[serde(default)]
    reading: Option<String>,
    word_classes: Vec<String>,
}

/// `(spelling, reading)` to word classes, for dictionaries that carry none
#[derive(Debug, Clone, Default)]
pub struct WordClassMap {
    entries: HashMap<(String, Option<String>), Vec<String>>,
}

impl WordClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<S: Into<String>>(
        entries: impl IntoIterator<Item = (S, Option<S>, Vec<S>)>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(spelling, reading, classes)| {
                (
                    (spelling.into(), reading.map(Into::into)),
                    classes.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let rows: Vec<WordClassJson> = serde_json::from_str(json)?;
        Ok(Self::from_entries(
            rows.into_iter()
                .map(|row| (row.spelling, row.reading, row.word_classes)),
        ))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }
        tracing::info!("Loading word classes from file: {}", path.display());
        let map = Self::from_json(&std::fs::read_to_string(path)?)?;
        tracing::info!("Loaded word classes for {} spellings", map.len());
        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WordClassTable for WordClassMap {
    fn word_classes(&self, spelling: &str, reading: Option<&str>) -> Option<&[String]> {
        self.entries
            .get(&(spelling.to_string(), reading.map(str::to_string)))
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_is_part_of_the_key() {
        let json = r#"[
            { "spelling": "方", "reading": "かた", "word_classes": ["n", "suf"] },
            { "spelling": "方", "reading": "ほう", "word_classes": ["n"] },
            { "spelling": "食べる", "word_classes": ["v1"] }
        ]"#;
        let map = WordClassMap::from_json(json).unwrap();

        assert_eq!(map.word_classes("方", Some("かた")).unwrap(), ["n", "suf"]);
        assert_eq!(map.word_classes("方", Some("ほう")).unwrap(), ["n"]);
        assert!(map.word_classes("方", None).is_none());
        assert_eq!(map.word_classes("食べる", None).unwrap(), ["v1"]);
        assert_eq!(map.len(), 3);
    }
}
