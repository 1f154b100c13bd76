use std::sync::Arc;
use std::time::{Duration, Instant};

use yomu_config::lookup::LookupConfig;

use crate::dictionary::{DictionaryStore, FrequencyStore, WordClassTable};

/// Everything a single lookup reads: dictionary snapshots, the frequency list,
/// the word-class fallback and the lookup settings
#[derive(Clone, Default)]
pub struct LookupContext {
    pub dictionaries: Vec<Arc<dyn DictionaryStore>>,
    pub frequency: Option<Arc<dyn FrequencyStore>>,
    pub word_classes: Option<Arc<dyn WordClassTable>>,
    pub config: LookupConfig,
}

impl LookupContext {
    pub fn new(config: LookupConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_dictionary(mut self, dictionary: Arc<dyn DictionaryStore>) -> Self {
        self.dictionaries.push(dictionary);
        self
    }

    pub fn with_frequency(mut self, frequency: Arc<dyn FrequencyStore>) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn with_word_classes(mut self, word_classes: Arc<dyn WordClassTable>) -> Self {
        self.word_classes = Some(word_classes);
        self
    }

    pub fn active_dictionaries(&self) -> impl Iterator<Item = &Arc<dyn DictionaryStore>> {
        self.dictionaries.iter().filter(|d| d.is_active())
    }

    /// True when at least one active dictionary is matched through deconjugation
    pub fn needs_deconjugation(&self) -> bool {
        self.active_dictionaries()
            .any(|d| d.kind().is_conjugation_sensitive())
    }

    pub fn active_frequency(&self) -> Option<&Arc<dyn FrequencyStore>> {
        self.frequency.as_ref().filter(|f| f.is_active())
    }
}

/// Rejects calls that arrive within `interval` of the last admitted one.
///
/// Not synchronised: one debouncer belongs to one caller sequence.
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    last: Option<Instant>,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record `now` and return true if the call may proceed
    pub fn admit(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if !self.interval.is_zero() && now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_calls_inside_interval() {
        let mut debouncer = Debouncer::from_millis(100);
        let start = Instant::now();

        assert!(debouncer.admit(start));
        assert!(!debouncer.admit(start + Duration::from_millis(5)));
        assert!(debouncer.admit(start + Duration::from_millis(100)));
    }

    #[test]
    fn rejected_calls_do_not_extend_the_window() {
        let mut debouncer = Debouncer::from_millis(100);
        let start = Instant::now();

        assert!(debouncer.admit(start));
        assert!(!debouncer.admit(start + Duration::from_millis(90)));
        assert!(debouncer.admit(start + Duration::from_millis(110)));
    }

    #[test]
    fn zero_interval_never_rejects() {
        let mut debouncer = Debouncer::from_millis(0);
        let now = Instant::now();
        assert!(debouncer.admit(now));
        assert!(debouncer.admit(now));
    }

    #[test]
    fn empty_context_needs_no_deconjugation() {
        let ctx = LookupContext::new(LookupConfig::default());
        assert!(!ctx.needs_deconjugation());
        assert!(ctx.active_frequency().is_none());
    }
}
