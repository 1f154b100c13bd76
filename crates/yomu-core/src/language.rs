use yomu_types::LookupResult;

use crate::error::LookupError;
use crate::lookup::LookupContext;

/// Text lookup interface for language implementations
pub trait LanguageProcessor: Send + Sync {
    /// Language identifier (ISO 639-1 code: "ja", "zh", "ko", etc.)
    fn language_code(&self) -> &str;

    /// Clean up captured text before it is handed to `lookup`
    fn normalize(&self, text: &str) -> String;

    /// Find and rank every dictionary entry matching a prefix of `text`
    /// starting at character `position`
    fn lookup(
        &mut self,
        ctx: &LookupContext,
        text: &str,
        position: usize,
    ) -> Result<LookupOutcome, LookupError>;
}

/// What a lookup call produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The call came too soon after the previous one and was not performed
    Debounced,
    /// Ranked matches, possibly none
    Results(Vec<LookupResult>),
}

impl LookupOutcome {
    pub fn is_debounced(&self) -> bool {
        matches!(self, LookupOutcome::Debounced)
    }

    pub fn results(&self) -> Option<&[LookupResult]> {
        match self {
            LookupOutcome::Debounced => None,
            LookupOutcome::Results(results) => Some(results),
        }
    }

    pub fn into_results(self) -> Option<Vec<LookupResult>> {
        match self {
            LookupOutcome::Debounced => None,
            LookupOutcome::Results(results) => Some(results),
        }
    }
}
