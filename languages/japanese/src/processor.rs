use std::time::Instant;

use yomu_config::lookup::LookupConfig;
use yomu_core::preprocess::{DefaultPreprocessor, Preprocessor};
use yomu_core::{
    Debouncer, Deconjugator, LanguageProcessor, LookupContext, LookupError, LookupOutcome,
};
use yomu_types::{DictionaryKind, LookupResult};

use crate::deconjugator::JapaneseDeconjugator;
use crate::kana::is_kanji;
use crate::matcher::{DictionaryMatcher, IntermediaryResult, check_kinds};
use crate::ranker::{ResultBuilder, sort_results};
use crate::scanner::scan;

/// Japanese language processor
pub struct JapaneseProcessor {
    deconjugator: JapaneseDeconjugator,
    debouncer: Debouncer,
}

impl JapaneseProcessor {
    /// Create a processor with the embedded rule table
    pub fn new(config: &LookupConfig) -> Self {
        Self::with_deconjugator(JapaneseDeconjugator::new(), config)
    }

    pub fn with_deconjugator(deconjugator: JapaneseDeconjugator, config: &LookupConfig) -> Self {
        Self {
            deconjugator,
            debouncer: Debouncer::from_millis(config.debounce_ms),
        }
    }

    pub fn deconjugator(&self) -> &JapaneseDeconjugator {
        &self.deconjugator
    }

    /// [`LanguageProcessor::lookup`] with an explicit clock
    pub fn lookup_at(
        &mut self,
        ctx: &LookupContext,
        text: &str,
        position: usize,
        now: Instant,
    ) -> Result<LookupOutcome, LookupError> {
        if !self.debouncer.admit(now) {
            tracing::debug!("Lookup debounced");
            return Ok(LookupOutcome::Debounced);
        }

        let query: String = text
            .chars()
            .skip(position)
            .take(ctx.config.max_search_length)
            .collect();

        let results = if ctx.config.kanji_mode {
            self.lookup_kanji(ctx, &query)?
        } else {
            self.lookup_words(ctx, &query)?
        };
        tracing::debug!("Lookup of '{}' returned {} results", query, results.len());

        Ok(LookupOutcome::Results(results))
    }

    fn lookup_words(
        &self,
        ctx: &LookupContext,
        query: &str,
    ) -> Result<Vec<LookupResult>, LookupError> {
        if query.is_empty() {
            return Ok(vec![]);
        }

        let deconjugator = ctx
            .needs_deconjugation()
            .then_some(&self.deconjugator as &dyn Deconjugator);
        let windows = scan(query, deconjugator);
        let matcher = DictionaryMatcher::new(ctx, deconjugator);
        let builder = ResultBuilder::new(ctx);

        let mut ranked = Vec::new();
        for store in ctx.active_dictionaries() {
            let matches = matcher.match_windows(store.as_ref(), &windows)?;
            let priority = store.priority();
            ranked.extend(
                builder
                    .build(store.as_ref(), &matches)
                    .into_iter()
                    .map(|result| (priority, result)),
            );
        }

        sort_results(&mut ranked);
        Ok(ranked.into_iter().map(|(_, result)| result).collect())
    }

    /// The leading character against kanji dictionaries, best priority first
    fn lookup_kanji(
        &self,
        ctx: &LookupContext,
        query: &str,
    ) -> Result<Vec<LookupResult>, LookupError> {
        let Some(character) = query.chars().next().filter(|c| is_kanji(*c)) else {
            return Ok(vec![]);
        };
        let key = character.to_string();

        let mut stores: Vec<_> = ctx
            .active_dictionaries()
            .filter(|d| d.kind() == DictionaryKind::Kanji)
            .collect();
        stores.sort_by_key(|d| d.priority());

        for store in stores {
            let Some(records) = store.try_get(&key) else {
                continue;
            };
            check_kinds(store.as_ref(), &key, records)?;
            if let Some(record) = records.first() {
                let matched = IntermediaryResult {
                    key: key.clone(),
                    matched_text: key.clone(),
                    records: vec![record],
                    processes: vec![],
                };
                let result = ResultBuilder::new(ctx).result(store.as_ref(), &matched, record);
                return Ok(vec![result]);
            }
        }

        Ok(vec![])
    }
}

impl LanguageProcessor for JapaneseProcessor {
    fn language_code(&self) -> &str {
        "ja"
    }

    fn normalize(&self, text: &str) -> String {
        DefaultPreprocessor.process(text)
    }

    fn lookup(
        &mut self,
        ctx: &LookupContext,
        text: &str,
        position: usize,
    ) -> Result<LookupOutcome, LookupError> {
        self.lookup_at(ctx, text, position, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn processor(debounce_ms: u64) -> JapaneseProcessor {
        JapaneseProcessor::new(&LookupConfig {
            debounce_ms,
            ..LookupConfig::default()
        })
    }

    #[test]
    fn debounced_call_is_not_an_empty_result() {
        let ctx = LookupContext::default();
        let mut processor = processor(100);
        let start = Instant::now();

        let first = processor.lookup_at(&ctx, "猫", 0, start).unwrap();
        assert_eq!(first, LookupOutcome::Results(vec![]));

        let second = processor
            .lookup_at(&ctx, "猫", 0, start + Duration::from_millis(5))
            .unwrap();
        assert!(second.is_debounced());
    }

    #[test]
    fn position_past_the_end_is_empty() {
        let ctx = LookupContext::default();
        let outcome = processor(0).lookup_at(&ctx, "猫", 5, Instant::now()).unwrap();
        assert_eq!(outcome.into_results(), Some(vec![]));
    }

    #[test]
    fn normalize_folds_width_and_joins_lines() {
        assert_eq!(processor(0).normalize("ﾈｺ\nです"), "ネコです");
        assert_eq!(processor(0).language_code(), "ja");
    }
}
