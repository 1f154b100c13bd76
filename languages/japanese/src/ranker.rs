use std::cmp::Reverse;

use indexmap::IndexSet;
use yomu_core::{DictionaryStore, LookupContext, RawRecord};
use yomu_types::{KanjiDetails, LookupResult, UNRANKED};

use crate::kana::katakana_to_hiragana;
use crate::matcher::{IntermediaryResult, Matches};

/// Turns matched records into [`LookupResult`]s
pub struct ResultBuilder<'c> {
    ctx: &'c LookupContext,
}

impl<'c> ResultBuilder<'c> {
    pub fn new(ctx: &'c LookupContext) -> Self {
        Self { ctx }
    }

    /// One result per record, in match order
    pub fn build(&self, store: &dyn DictionaryStore, matches: &Matches<'_>) -> Vec<LookupResult> {
        matches
            .values()
            .flat_map(|m| m.records.iter().map(move |record| self.result(store, m, record)))
            .collect()
    }

    pub(crate) fn result(
        &self,
        store: &dyn DictionaryStore,
        matched: &IntermediaryResult<'_>,
        record: &RawRecord,
    ) -> LookupResult {
        let mut result = LookupResult {
            primary_spelling: record.primary_spelling().to_string(),
            readings: record.readings().to_vec(),
            alternative_spellings: record.alternative_spellings().to_vec(),
            primary_spelling_orthography_info: vec![],
            readings_orthography_info: vec![],
            alternative_spellings_orthography_info: vec![],
            formatted_definitions: format_definitions(record),
            matched_text: matched.matched_text.clone(),
            deconjugated_matched_text: matched.key.clone(),
            frequency: self.frequency(record),
            dictionary_kind: store.kind(),
            dictionary_name: store.name().to_string(),
            deconjugation_process: format_process(&matched.processes),
            kanji: None,
        };

        match record {
            RawRecord::Word(entry) => {
                result.primary_spelling_orthography_info = entry.spelling_orthography_info.clone();
                result.readings_orthography_info = entry.readings_orthography_info.clone();
                result.alternative_spellings_orthography_info =
                    entry.alternative_spellings_orthography_info.clone();
            }
            RawRecord::Kanji(entry) => {
                result.readings = entry
                    .on_readings
                    .iter()
                    .chain(&entry.kun_readings)
                    .cloned()
                    .collect();
                result.kanji = Some(KanjiDetails {
                    on_readings: entry.on_readings.clone(),
                    kun_readings: entry.kun_readings.clone(),
                    nanori_readings: entry.nanori_readings.clone(),
                    stroke_count: entry.stroke_count,
                    grade: entry.grade,
                    composition: entry.composition.clone(),
                });
            }
            RawRecord::Name(_) | RawRecord::Custom(_) => {}
        }

        result
    }

    /// Lowest rank found for the spelling, else for the readings, else for the
    /// alternative spellings
    pub fn frequency(&self, record: &RawRecord) -> u32 {
        if let RawRecord::Kanji(entry) = record {
            return entry.frequency.unwrap_or(UNRANKED);
        }
        let Some(store) = self.ctx.active_frequency() else {
            return UNRANKED;
        };

        let known: Vec<String> = std::iter::once(record.primary_spelling())
            .chain(record.readings().iter().map(String::as_str))
            .chain(record.alternative_spellings().iter().map(String::as_str))
            .map(katakana_to_hiragana)
            .collect();
        let lowest = |keys: &[String]| {
            keys.iter()
                .filter_map(|key| store.try_get(&katakana_to_hiragana(key)))
                .flatten()
                .filter(|f| known.contains(&katakana_to_hiragana(&f.spelling)))
                .map(|f| f.rank)
                .min()
        };

        let primary = [record.primary_spelling().to_string()];
        lowest(&primary[..])
            .or_else(|| lowest(record.readings()))
            .or_else(|| lowest(record.alternative_spellings()))
            .unwrap_or(UNRANKED)
    }
}

/// A result paired with the priority of the store that produced it
pub type Ranked = (u32, LookupResult);

/// Longest match first, then dictionary priority, then frequency. Stable.
pub fn sort_results(results: &mut [Ranked]) {
    results.sort_by_key(|(priority, r)| (Reverse(r.matched_len()), *priority, r.frequency));
}

/// Render process chains citation form first, e.g. `～causative→past`
pub fn format_process(processes: &[Vec<String>]) -> Option<String> {
    let chains: IndexSet<String> = processes
        .iter()
        .map(|chain| {
            chain
                .iter()
                .rev()
                .map(String::as_str)
                .filter(|step| !is_internal(step))
                .collect::<Vec<_>>()
                .join("→")
        })
        .filter(|chain| !chain.is_empty())
        .map(|chain| format!("～{chain}"))
        .collect();

    (!chains.is_empty()).then(|| chains.into_iter().collect::<Vec<_>>().join("; "))
}

fn is_internal(step: &str) -> bool {
    step.is_empty() || (step.starts_with('(') && step.ends_with(')'))
}

pub fn format_definitions(record: &RawRecord) -> String {
    match record {
        RawRecord::Word(entry) => entry
            .senses
            .iter()
            .enumerate()
            .map(|(i, sense)| {
                let labels: Vec<&str> = sense
                    .word_classes
                    .iter()
                    .chain(&sense.misc)
                    .map(String::as_str)
                    .collect();
                numbered(i, &labels, &sense.glosses.join("; "))
            })
            .collect::<Vec<_>>()
            .join(" "),
        RawRecord::Name(entry) => {
            let translations = entry.translations.join("; ");
            if entry.name_types.is_empty() {
                translations
            } else {
                format!("({}) {}", entry.name_types.join(", "), translations)
            }
        }
        RawRecord::Kanji(entry) => entry.meanings.join(", "),
        RawRecord::Custom(entry) => {
            let labels: Vec<&str> = entry.word_classes.iter().map(String::as_str).collect();
            entry
                .definitions
                .iter()
                .enumerate()
                .map(|(i, definition)| {
                    let shown = if i == 0 { labels.len() } else { 0 };
                    numbered(i, &labels[..shown], definition)
                })
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

fn numbered(index: usize, labels: &[&str], text: &str) -> String {
    if labels.is_empty() {
        format!("({}) {}", index + 1, text)
    } else {
        format!("({}) ({}) {}", index + 1, labels.join(", "), text)
    }
}
