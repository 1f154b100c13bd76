use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use yomu_types::DictionaryKind;

/// One sense of a word entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordSense {
    pub glosses: Vec<String>,
    /// Part-of-speech codes such as `v1`, `v5k`, `adj-i`
    pub word_classes: Vec<String>,
    /// Usage notes such as `uk` or `col`
    pub misc: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordEntry {
    pub id: String,
    pub spelling: String,
    pub readings: Vec<String>,
    pub alternative_spellings: Vec<String>,
    pub spelling_orthography_info: Vec<String>,
    pub readings_orthography_info: Vec<Vec<String>>,
    pub alternative_spellings_orthography_info: Vec<Vec<String>>,
    pub senses: Vec<WordSense>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameEntry {
    pub id: String,
    pub spelling: String,
    pub readings: Vec<String>,
    /// e.g. `surname`, `place`
    pub name_types: Vec<String>,
    pub translations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanjiEntry {
    pub character: String,
    pub on_readings: Vec<String>,
    pub kun_readings: Vec<String>,
    pub nanori_readings: Vec<String>,
    pub meanings: Vec<String>,
    pub stroke_count: u8,
    pub grade: Option<u8>,
    pub frequency: Option<u32>,
    pub composition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomEntry {
    pub spelling: String,
    pub readings: Vec<String>,
    pub alternative_spellings: Vec<String>,
    pub definitions: Vec<String>,
    /// Empty for custom names and for words entered without a class
    pub word_classes: Vec<String>,
}

/// A record as stored by a dictionary backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawRecord {
    Word(WordEntry),
    Name(NameEntry),
    Kanji(KanjiEntry),
    Custom(CustomEntry),
}

impl RawRecord {
    pub fn primary_spelling(&self) -> &str {
        match self {
            RawRecord::Word(e) => &e.spelling,
            RawRecord::Name(e) => &e.spelling,
            RawRecord::Kanji(e) => &e.character,
            RawRecord::Custom(e) => &e.spelling,
        }
    }

    pub fn readings(&self) -> &[String] {
        match self {
            RawRecord::Word(e) => &e.readings,
            RawRecord::Name(e) => &e.readings,
            RawRecord::Kanji(_) => &[],
            RawRecord::Custom(e) => &e.readings,
        }
    }

    pub fn alternative_spellings(&self) -> &[String] {
        match self {
            RawRecord::Word(e) => &e.alternative_spellings,
            RawRecord::Custom(e) => &e.alternative_spellings,
            RawRecord::Name(_) | RawRecord::Kanji(_) => &[],
        }
    }

    /// Word classes of every sense, flattened
    pub fn word_classes(&self) -> Vec<&str> {
        match self {
            RawRecord::Word(e) => e
                .senses
                .iter()
                .flat_map(|s| s.word_classes.iter().map(String::as_str))
                .collect(),
            RawRecord::Custom(e) => e.word_classes.iter().map(String::as_str).collect(),
            RawRecord::Name(_) | RawRecord::Kanji(_) => vec![],
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            RawRecord::Word(_) => "word",
            RawRecord::Name(_) => "name",
            RawRecord::Kanji(_) => "kanji",
            RawRecord::Custom(_) => "custom",
        }
    }

    /// Whether a dictionary of `kind` may hold this record
    pub fn fits(&self, kind: DictionaryKind) -> bool {
        matches!(
            (self, kind),
            (RawRecord::Word(_), DictionaryKind::Word)
                | (RawRecord::Name(_), DictionaryKind::Name)
                | (RawRecord::Kanji(_), DictionaryKind::Kanji)
                | (
                    RawRecord::Custom(_),
                    DictionaryKind::CustomWord | DictionaryKind::CustomName
                )
        )
    }
}

/// Read-only key to records map of one dictionary
pub trait DictionaryStore: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> DictionaryKind;

    fn is_active(&self) -> bool;

    /// Lower sorts first
    fn priority(&self) -> u32;

    /// Records stored under `key`, a hiragana-folded spelling or reading
    fn try_get(&self, key: &str) -> Option<&[RawRecord]>;

    fn entry_count(&self) -> usize;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    pub spelling: String,
    /// Lower is more common
    pub rank: u32,
}

/// Read-only frequency list keyed by hiragana-folded spelling
pub trait FrequencyStore: Send + Sync {
    fn name(&self) -> &str;

    fn is_active(&self) -> bool;

    fn try_get(&self, key: &str) -> Option<&[FrequencyRecord]>;
}

/// Word classes for records whose own dictionary carries none
pub trait WordClassTable: Send + Sync {
    fn word_classes(&self, spelling: &str, reading: Option<&str>) -> Option<&[String]>;
}

/// Current set of loaded dictionaries.
///
/// Stores are never mutated once published: a reload builds a new store and
/// swaps it in, so a lookup holding an older snapshot keeps a consistent view.
#[derive(Default)]
pub struct DictionaryRegistry {
    dictionaries: RwLock<Vec<Arc<dyn DictionaryStore>>>,
}

impl DictionaryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `store`, replacing any dictionary with the same name
    pub fn replace(&self, store: Arc<dyn DictionaryStore>) {
        let mut dictionaries = self
            .dictionaries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match dictionaries.iter_mut().find(|d| d.name() == store.name()) {
            Some(slot) => {
                tracing::info!("Replacing dictionary {}", store.name());
                *slot = store;
            }
            None => {
                tracing::info!("Registering dictionary {}", store.name());
                dictionaries.push(store);
            }
        }
    }

    pub fn remove(&self, name: &str) -> bool {
        let mut dictionaries = self
            .dictionaries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = dictionaries.len();
        dictionaries.retain(|d| d.name() != name);
        before != dictionaries.len()
    }

    pub fn snapshot(&self) -> Vec<Arc<dyn DictionaryStore>> {
        self.dictionaries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.dictionaries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
