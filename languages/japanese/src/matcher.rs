use std::ptr;

use indexmap::IndexMap;
use yomu_core::{Deconjugator, DictionaryStore, Form, LookupContext, LookupError, RawRecord};

use crate::kana::{LONG_VOWEL_MARK, expand_long_vowels};

/// Ambiguous `ー` marks allowed to fork per window on a long vowel retry
const MAX_LONG_VOWEL_FORKS: usize = 3;
use crate::scanner::Window;

/// Records of one dictionary found under one key
#[derive(Debug, Clone)]
pub struct IntermediaryResult<'a> {
    /// Dictionary key, hiragana-folded
    pub key: String,
    /// Substring of the query that produced the key
    pub matched_text: String,
    pub records: Vec<&'a RawRecord>,
    /// One chain per deconjugation path that reached the key; empty for an exact match
    pub processes: Vec<Vec<String>>,
}

impl IntermediaryResult<'_> {
    pub fn is_exact(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn matched_len(&self) -> usize {
        self.matched_text.chars().count()
    }
}

pub type Matches<'a> = IndexMap<String, IntermediaryResult<'a>>;

/// Resolves scanned windows against one dictionary at a time
pub struct DictionaryMatcher<'c> {
    ctx: &'c LookupContext,
    deconjugator: Option<&'c dyn Deconjugator>,
}

impl<'c> DictionaryMatcher<'c> {
    pub fn new(ctx: &'c LookupContext, deconjugator: Option<&'c dyn Deconjugator>) -> Self {
        Self { ctx, deconjugator }
    }

    pub fn match_windows<'s>(
        &self,
        store: &'s dyn DictionaryStore,
        windows: &[Window],
    ) -> Result<Matches<'s>, LookupError> {
        let mut matches = Matches::new();
        let conjugates = store.kind().is_conjugation_sensitive();
        let mut forks_capped = false;

        for window in windows {
            let mut budget = self.ctx.config.max_deconjugated_matches;
            let forms: &[Form] = if conjugates { &window.deconjugations } else { &[] };
            let mut found = self.match_key(
                store,
                &window.hiragana,
                &window.text,
                forms,
                &mut budget,
                &mut matches,
            )?;

            if found || !has_inner_long_vowel(&window.hiragana) {
                continue;
            }

            let (variants, capped) = expand_long_vowels(&window.hiragana, MAX_LONG_VOWEL_FORKS);
            forks_capped |= capped;
            for variant in variants {
                if variant == window.hiragana {
                    continue;
                }
                let forms = match self.deconjugator {
                    Some(deconjugator) if conjugates => deconjugator.deconjugate(&variant),
                    _ => Vec::new(),
                };
                found |= self.match_key(
                    store,
                    &variant,
                    &window.text,
                    &forms,
                    &mut budget,
                    &mut matches,
                )?;
            }
            if found {
                tracing::trace!("Matched '{}' after long vowel expansion", window.text);
            }
        }

        if forks_capped {
            tracing::warn!(
                "Long vowel expansion limited to {} ambiguous marks per window",
                MAX_LONG_VOWEL_FORKS
            );
        }
        tracing::debug!("{}: {} matched keys", store.name(), matches.len());
        Ok(matches)
    }

    /// Exact then deconjugated lookup of one key. True when the store had anything usable.
    fn match_key<'s>(
        &self,
        store: &'s dyn DictionaryStore,
        key: &str,
        matched_text: &str,
        forms: &[Form],
        budget: &mut usize,
        matches: &mut Matches<'s>,
    ) -> Result<bool, LookupError> {
        let mut found = false;

        if let Some(records) = store.try_get(key).filter(|r| !r.is_empty()) {
            check_kinds(store, key, records)?;
            record(matches, key, matched_text, records.iter().collect(), None);
            found = true;
        }

        for form in forms {
            if *budget == 0 {
                break;
            }
            let Some(records) = store.try_get(form.text()) else {
                continue;
            };
            check_kinds(store, form.text(), records)?;

            let accepted: Vec<&RawRecord> =
                records.iter().filter(|r| self.accepts(form, r)).collect();
            if accepted.is_empty() {
                continue;
            }
            found = true;
            if record(matches, form.text(), matched_text, accepted, Some(form.process())) {
                *budget -= 1;
            }
        }

        Ok(found)
    }

    /// Whether `record` may be the citation form `form` arrived at
    fn accepts(&self, form: &Form, record: &RawRecord) -> bool {
        let Some(tag) = form.last_tag() else {
            return true;
        };

        let own = record.word_classes();
        if !own.is_empty() {
            return own.contains(&tag);
        }

        self.fallback_classes(record)
            .is_none_or(|classes| classes.iter().any(|c| c == tag))
    }

    fn fallback_classes(&self, record: &RawRecord) -> Option<&[String]> {
        let table = self.ctx.word_classes.as_deref()?;
        let spelling = record.primary_spelling();
        record
            .readings()
            .iter()
            .find_map(|reading| table.word_classes(spelling, Some(reading)))
            .or_else(|| table.word_classes(spelling, None))
    }
}

fn has_inner_long_vowel(text: &str) -> bool {
    text.chars().skip(1).any(|c| c == LONG_VOWEL_MARK)
}

pub(crate) fn check_kinds(
    store: &dyn DictionaryStore,
    key: &str,
    records: &[RawRecord],
) -> Result<(), LookupError> {
    match records.iter().find(|r| !r.fits(store.kind())) {
        Some(record) => Err(LookupError::InconsistentStore {
            dictionary: store.name().to_string(),
            key: key.to_string(),
            expected: store.kind(),
            found: record.kind_name(),
        }),
        None => Ok(()),
    }
}

/// Add records under `key`. Returns false when the key already belongs to a
/// longer match or to an exact match.
fn record<'s>(
    matches: &mut Matches<'s>,
    key: &str,
    matched_text: &str,
    records: Vec<&'s RawRecord>,
    process: Option<&[String]>,
) -> bool {
    let Some(existing) = matches.get_mut(key) else {
        matches.insert(
            key.to_string(),
            IntermediaryResult {
                key: key.to_string(),
                matched_text: matched_text.to_string(),
                records,
                processes: process.map(|p| vec![p.to_vec()]).unwrap_or_default(),
            },
        );
        return true;
    };

    if existing.matched_len() != matched_text.chars().count() || existing.is_exact() {
        return false;
    }
    let Some(process) = process else {
        return false;
    };

    if !existing.processes.iter().any(|p| p == process) {
        existing.processes.push(process.to_vec());
    }
    for r in records {
        if !existing.records.iter().any(|e| ptr::eq(*e, r)) {
            existing.records.push(r);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use yomu_config::lookup::LookupConfig;
    use yomu_core::{NameEntry, WordEntry, WordSense};
    use yomu_types::DictionaryKind;

    use super::*;
    use crate::dictionary::MemoryDictionary;
    use crate::rules::RuleTable;
    use crate::scanner::scan;
    use crate::word_class::WordClassMap;
    use crate::JapaneseDeconjugator;

    fn word(spelling: &str, reading: &str, classes: &[&str]) -> RawRecord {
        RawRecord::Word(WordEntry {
            spelling: spelling.to_string(),
            readings: vec![reading.to_string()],
            senses: vec![WordSense {
                glosses: vec![format!("gloss of {spelling}")],
                word_classes: classes.iter().map(|c| c.to_string()).collect(),
                ..WordSense::default()
            }],
            ..WordEntry::default()
        })
    }

    fn run<'s>(
        ctx: &LookupContext,
        store: &'s MemoryDictionary,
        text: &str,
    ) -> Result<Matches<'s>, LookupError> {
        run_with(&JapaneseDeconjugator::new(), ctx, store, text)
    }

    fn run_with<'s>(
        deconjugator: &JapaneseDeconjugator,
        ctx: &LookupContext,
        store: &'s MemoryDictionary,
        text: &str,
    ) -> Result<Matches<'s>, LookupError> {
        let windows = scan(text, Some(deconjugator));
        DictionaryMatcher::new(ctx, Some(deconjugator)).match_windows(store, &windows)
    }

    #[test]
    fn exact_and_deconjugated_keys() {
        let ctx = LookupContext::default();
        let store = MemoryDictionary::from_records(
            "JMdict",
            DictionaryKind::Word,
            1,
            vec![word("食べる", "たべる", &["v1", "vt"]), word("食べ", "たべ", &["n"])],
        );

        let matches = run(&ctx, &store, "食べた").unwrap();

        let taberu = &matches["食べる"];
        assert_eq!(taberu.matched_text, "食べた");
        assert_eq!(taberu.processes, vec![vec!["past".to_string()]]);

        let tabe = &matches["食べ"];
        assert!(tabe.is_exact());
        assert_eq!(tabe.matched_text, "食べ");
    }

    #[test]
    fn word_class_must_agree_with_the_path() {
        let ctx = LookupContext::default();
        // 書く is godan, so an ichidan reading of 書いた is rejected
        let store = MemoryDictionary::from_records(
            "JMdict",
            DictionaryKind::Word,
            1,
            vec![word("書いる", "かいる", &["v5r"]), word("書く", "かく", &["v5k"])],
        );

        let matches = run(&ctx, &store, "書いた").unwrap();
        assert!(matches.contains_key("書く"));
        assert!(!matches.contains_key("書いる"));
    }

    #[test]
    fn fallback_table_supplies_missing_classes() {
        let bare = RawRecord::Word(WordEntry {
            spelling: "食べる".to_string(),
            readings: vec!["たべる".to_string()],
            ..WordEntry::default()
        });
        let store =
            MemoryDictionary::from_records("Custom", DictionaryKind::Word, 1, vec![bare]);

        let unknown = LookupContext::default();
        assert!(run(&unknown, &store, "食べた").unwrap().contains_key("食べる"));

        let godan = LookupContext::default().with_word_classes(Arc::new(
            WordClassMap::from_entries([("食べる", Some("たべる"), vec!["v5r"])]),
        ));
        assert!(!run(&godan, &store, "食べた").unwrap().contains_key("食べる"));

        let ichidan = LookupContext::default().with_word_classes(Arc::new(
            WordClassMap::from_entries([("食べる", None, vec!["v1"])]),
        ));
        assert!(run(&ichidan, &store, "食べた").unwrap().contains_key("食べる"));
    }

    #[test]
    fn longer_window_owns_its_key() {
        let ctx = LookupContext::default();
        let store = MemoryDictionary::from_records(
            "JMdict",
            DictionaryKind::Word,
            1,
            vec![word("食べる", "たべる", &["v1"])],
        );

        // both 食べたら and 食べた reach 食べる
        let matches = run(&ctx, &store, "食べたら").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches["食べる"].matched_text, "食べたら");
        assert_eq!(
            matches["食べる"].processes,
            vec![vec!["conditional".to_string(), "past".to_string()]]
        );
    }

    #[test]
    fn long_vowel_retry() {
        let ctx = LookupContext::default();
        let store = MemoryDictionary::from_records(
            "JMdict",
            DictionaryKind::Word,
            1,
            vec![word("とおい", "とおい", &["adj-i"])],
        );

        let matches = run(&ctx, &store, "とーい").unwrap();
        assert_eq!(matches["とおい"].matched_text, "とーい");
        assert!(matches["とおい"].is_exact());

        // the variants are deconjugated too
        let matches = run(&ctx, &store, "とーかった").unwrap();
        assert_eq!(matches["とおい"].matched_text, "とーかった");
        assert_eq!(matches["とおい"].processes, vec![vec!["past".to_string()]]);
    }

    #[test]
    fn long_vowel_forks_are_bounded() {
        let ctx = LookupContext::default();
        let store = MemoryDictionary::from_records(
            "JMdict",
            DictionaryKind::Word,
            1,
            vec![word("遠", "とお", &["n"])],
        );

        // 18 ambiguous marks would be 2^18 variants per window without the limit
        let matches = run(&ctx, &store, &"とー".repeat(18)).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches["とお"].matched_text, "とー");
    }

    #[test]
    fn paths_to_the_same_key_merge_their_chains() {
        let json = r#"[
            { "kind": "standard", "dec_end": "る", "con_end": "た", "dec_tag": "v1", "con_tag": "uninflectable", "detail": "past" },
            { "kind": "standard", "dec_end": "る", "con_end": "た", "dec_tag": "v5r", "con_tag": "uninflectable", "detail": "godan past" }
        ]"#;
        let deconjugator = JapaneseDeconjugator::with_rules(RuleTable::from_json(json).unwrap());
        let ctx = LookupContext::default();
        let store = MemoryDictionary::from_records(
            "JMdict",
            DictionaryKind::Word,
            1,
            vec![word("たべる", "たべる", &["v1", "v5r"])],
        );

        let matches = run_with(&deconjugator, &ctx, &store, "たべた").unwrap();
        let taberu = &matches["たべる"];
        assert_eq!(
            taberu.processes,
            vec![vec!["past".to_string()], vec!["godan past".to_string()]]
        );
        assert_eq!(taberu.records.len(), 1);
        assert_eq!(taberu.matched_text, "たべた");
    }

    #[test]
    fn deconjugated_matches_are_capped_per_window() {
        let ctx = LookupContext::new(LookupConfig {
            max_deconjugated_matches: 1,
            ..LookupConfig::default()
        });
        let store = MemoryDictionary::from_records(
            "JMdict",
            DictionaryKind::Word,
            1,
            vec![
                word("かう", "かう", &["v5u"]),
                word("かつ", "かつ", &["v5t"]),
                word("かる", "かる", &["v5r"]),
            ],
        );

        let matches = run(&ctx, &store, "かった").unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn name_dictionaries_skip_deconjugation() {
        let ctx = LookupContext::default();
        let name = RawRecord::Name(NameEntry {
            spelling: "田中".to_string(),
            readings: vec!["たなか".to_string()],
            translations: vec!["Tanaka".to_string()],
            ..NameEntry::default()
        });
        let store = MemoryDictionary::from_records("JMnedict", DictionaryKind::Name, 2, vec![name]);

        let matches = run(&ctx, &store, "たなかった").unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches["たなか"].is_exact());
    }

    #[test]
    fn record_kind_must_fit_the_dictionary() {
        let ctx = LookupContext::default();
        let store = MemoryDictionary::from_records(
            "Broken",
            DictionaryKind::Kanji,
            1,
            vec![word("猫", "ねこ", &["n"])],
        );

        let err = run(&ctx, &store, "猫").unwrap_err();
        assert!(matches!(err, LookupError::InconsistentStore { found: "word", .. }));
    }
}
