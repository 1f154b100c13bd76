use std::collections::HashMap;

use indexmap::IndexSet;
use serde::Deserialize;
use yomu_core::{
    CustomEntry, DictionaryStore, KanjiEntry, LoadError, NameEntry, RawRecord, WordEntry,
    WordSense,
};
use yomu_types::DictionaryKind;

use crate::kana::katakana_to_hiragana;

// JSON structures for parsing jmdict-simplified format
#[derive(Debug, Deserialize)]
struct JMdictJson {
    words: Vec<JMdictJsonEntry>,
}

#[derive(Debug, Deserialize)]
struct JMdictJsonEntry {
    id: String,
    #[serde(default)]
    kanji: Vec<TextElement>,
    #[serde(default)]
    kana: Vec<TextElement>,
    #[serde(default)]
    sense: Vec<Sense>,
}

#[derive(Debug, Deserialize)]
struct TextElement {
    text: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Sense {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: Vec<String>,
    #[serde(default)]
    misc: Vec<String>,
    #[serde(default)]
    gloss: Vec<Gloss>,
}

#[derive(Debug, Deserialize)]
struct Gloss {
    #[serde(default = "default_lang")]
    lang: String,
    text: String,
}

// jmnedict-simplified
#[derive(Debug, Deserialize)]
struct JMnedictJson {
    words: Vec<JMnedictJsonEntry>,
}

#[derive(Debug, Deserialize)]
struct JMnedictJsonEntry {
    id: String,
    #[serde(default)]
    kanji: Vec<TextElement>,
    #[serde(default)]
    kana: Vec<TextElement>,
    #[serde(default)]
    translation: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "type", default)]
    name_types: Vec<String>,
    #[serde(default)]
    translation: Vec<Gloss>,
}

fn default_lang() -> String {
    "eng".to_string()
}

fn english(glosses: &[Gloss]) -> Vec<String> {
    glosses
        .iter()
        .filter(|g| g.lang == "eng")
        .map(|g| g.text.clone())
        .collect()
}

/// Headword and readings of a jmdict-style entry. Kana-only entries use their
/// first kana as the spelling.
fn split_headword(
    kanji: Vec<TextElement>,
    kana: Vec<TextElement>,
) -> Option<(TextElement, Vec<TextElement>, Vec<TextElement>)> {
    let mut kanji = kanji.into_iter();
    let mut kana = kana.into_iter();
    match kanji.next() {
        Some(spelling) => Some((spelling, kana.collect(), kanji.collect())),
        None => kana.next().map(|spelling| (spelling, kana.collect(), vec![])),
    }
}

fn texts(elements: &[TextElement]) -> Vec<String> {
    elements.iter().map(|e| e.text.clone()).collect()
}

fn tags(elements: &[TextElement]) -> Vec<Vec<String>> {
    elements.iter().map(|e| e.tags.clone()).collect()
}

/// In-memory dictionary keyed by hiragana-folded spelling, reading and
/// alternative spelling. Never modified after construction.
#[derive(Debug, Clone)]
pub struct MemoryDictionary {
    name: String,
    kind: DictionaryKind,
    priority: u32,
    active: bool,
    entries: HashMap<String, Vec<RawRecord>>,
    record_count: usize,
}

impl MemoryDictionary {
    pub fn new(name: &str, kind: DictionaryKind, priority: u32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            priority,
            active: true,
            entries: HashMap::new(),
            record_count: 0,
        }
    }

    pub fn from_records(
        name: &str,
        kind: DictionaryKind,
        priority: u32,
        records: Vec<RawRecord>,
    ) -> Self {
        let mut dict = Self::new(name, kind, priority);
        for record in records {
            dict.insert(record);
        }
        dict
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    fn insert(&mut self, record: RawRecord) {
        let keys: IndexSet<String> = std::iter::once(record.primary_spelling())
            .chain(record.readings().iter().map(String::as_str))
            .chain(record.alternative_spellings().iter().map(String::as_str))
            .filter(|k| !k.is_empty())
            .map(katakana_to_hiragana)
            .collect();

        for key in keys {
            self.entries.entry(key).or_default().push(record.clone());
        }
        self.record_count += 1;
    }

    /// Load a word dictionary from a jmdict-simplified export
    pub fn from_jmdict_json(name: &str, priority: u32, json: &str) -> Result<Self, LoadError> {
        let data: JMdictJson = serde_json::from_str(json)?;
        let mut dict = Self::new(name, DictionaryKind::Word, priority);

        for entry in data.words {
            let senses: Vec<WordSense> = entry
                .sense
                .iter()
                .map(|s| WordSense {
                    glosses: english(&s.gloss),
                    word_classes: s.part_of_speech.clone(),
                    misc: s.misc.clone(),
                })
                .filter(|s| !s.glosses.is_empty())
                .collect();

            // Skip entries with no English meanings
            if senses.is_empty() {
                continue;
            }
            let Some((spelling, readings, alternatives)) = split_headword(entry.kanji, entry.kana)
            else {
                continue;
            };

            dict.insert(RawRecord::Word(WordEntry {
                id: entry.id,
                spelling: spelling.text,
                readings: texts(&readings),
                alternative_spellings: texts(&alternatives),
                spelling_orthography_info: spelling.tags,
                readings_orthography_info: tags(&readings),
                alternative_spellings_orthography_info: tags(&alternatives),
                senses,
            }));
        }

        Ok(dict)
    }

    /// Load a name dictionary from a jmnedict-simplified export
    pub fn from_jmnedict_json(name: &str, priority: u32, json: &str) -> Result<Self, LoadError> {
        let data: JMnedictJson = serde_json::from_str(json)?;
        let mut dict = Self::new(name, DictionaryKind::Name, priority);

        for entry in data.words {
            let translations: Vec<String> = entry
                .translation
                .iter()
                .flat_map(|t| english(&t.translation))
                .collect();
            if translations.is_empty() {
                continue;
            }
            let mut name_types: Vec<String> = entry
                .translation
                .iter()
                .flat_map(|t| t.name_types.iter().cloned())
                .collect();
            name_types.dedup();

            let Some((spelling, readings, _)) = split_headword(entry.kanji, entry.kana) else {
                continue;
            };

            dict.insert(RawRecord::Name(NameEntry {
                id: entry.id,
                spelling: spelling.text,
                readings: texts(&readings),
                name_types,
                translations,
            }));
        }

        Ok(dict)
    }

    /// Load a kanji or custom dictionary from a JSON array of entries
    pub fn from_records_json(
        name: &str,
        kind: DictionaryKind,
        priority: u32,
        json: &str,
    ) -> Result<Self, LoadError> {
        let records: Vec<RawRecord> = match kind {
            DictionaryKind::Kanji => serde_json::from_str::<Vec<KanjiEntry>>(json)?
                .into_iter()
                .map(RawRecord::Kanji)
                .collect(),
            DictionaryKind::CustomWord | DictionaryKind::CustomName => {
                serde_json::from_str::<Vec<CustomEntry>>(json)?
                    .into_iter()
                    .map(RawRecord::Custom)
                    .collect()
            }
            DictionaryKind::Word | DictionaryKind::Name => {
                return Err(LoadError::InvalidFormat(format!(
                    "{} dictionaries are read from jmdict-simplified exports",
                    kind.as_str()
                )));
            }
        };

        Ok(Self::from_records(name, kind, priority, records))
    }
}

impl DictionaryStore for MemoryDictionary {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DictionaryKind {
        self.kind
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn try_get(&self, key: &str) -> Option<&[RawRecord]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    fn entry_count(&self) -> usize {
        self.record_count
    }
}
