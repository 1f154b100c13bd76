use std::sync::{Arc, PoisonError, RwLock};

use yomu_config::Config;

use crate::dictionary::{DictionaryRegistry, FrequencyStore, WordClassTable};
use crate::lookup::LookupContext;

/// Long-lived engine state shared between the loader and the lookup caller
#[derive(Default)]
pub struct AppState {
    pub config: RwLock<Config>,
    pub dictionaries: DictionaryRegistry,
    frequency: RwLock<Option<Arc<dyn FrequencyStore>>>,
    word_classes: RwLock<Option<Arc<dyn WordClassTable>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            ..Self::default()
        }
    }

    pub fn set_frequency(&self, frequency: Option<Arc<dyn FrequencyStore>>) {
        *self
            .frequency
            .write()
            .unwrap_or_else(PoisonError::into_inner) = frequency;
    }

    pub fn set_word_classes(&self, word_classes: Option<Arc<dyn WordClassTable>>) {
        *self
            .word_classes
            .write()
            .unwrap_or_else(PoisonError::into_inner) = word_classes;
    }

    /// Snapshot of the current data for one lookup
    pub fn context(&self) -> LookupContext {
        let config = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lookup
            .clone();

        LookupContext {
            dictionaries: self.dictionaries.snapshot(),
            frequency: self
                .frequency
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            word_classes: self
                .word_classes
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            config,
        }
    }
}
