use serde::{Deserialize, Serialize};

/// Frequency rank assigned when no frequency data is known. Sorts last.
pub const UNRANKED: u32 = u32::MAX;

/// The fixed set of dictionary shapes a lookup can address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictionaryKind {
    /// JMdict-style word dictionary
    Word,
    /// JMnedict-style name dictionary
    Name,
    /// KANJIDIC-style kanji dictionary
    Kanji,
    /// User-maintained word list
    CustomWord,
    /// User-maintained name list
    CustomName,
}

impl DictionaryKind {
    /// Whether lookups against this kind go through deconjugation
    pub fn is_conjugation_sensitive(&self) -> bool {
        matches!(self, DictionaryKind::Word | DictionaryKind::CustomWord)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DictionaryKind::Word => "word",
            DictionaryKind::Name => "name",
            DictionaryKind::Kanji => "kanji",
            DictionaryKind::CustomWord => "custom_word",
            DictionaryKind::CustomName => "custom_name",
        }
    }
}

/// Kanji-only fields of a [`LookupResult`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiDetails {
    pub on_readings: Vec<String>,
    pub kun_readings: Vec<String>,
    pub nanori_readings: Vec<String>,
    pub stroke_count: u8,
    pub grade: Option<u8>,
    pub composition: Option<String>,
}

/// One matched dictionary record, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub primary_spelling: String,
    pub readings: Vec<String>,
    pub alternative_spellings: Vec<String>,
    pub primary_spelling_orthography_info: Vec<String>,
    pub readings_orthography_info: Vec<Vec<String>>,
    pub alternative_spellings_orthography_info: Vec<Vec<String>>,
    pub formatted_definitions: String,
    /// Substring of the query that was consumed by this match
    pub matched_text: String,
    /// Dictionary key the match was found under
    pub deconjugated_matched_text: String,
    /// Lower is more common, [`UNRANKED`] when unknown
    pub frequency: u32,
    pub dictionary_kind: DictionaryKind,
    pub dictionary_name: String,
    pub deconjugation_process: Option<String>,
    pub kanji: Option<KanjiDetails>,
}

impl LookupResult {
    /// Length of the matched text in characters
    pub fn matched_len(&self) -> usize {
        self.matched_text.chars().count()
    }
}
