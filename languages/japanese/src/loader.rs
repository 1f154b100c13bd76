use std::path::Path;
use std::sync::Arc;

use yomu_config::dictionary::DictionaryConfig;
use yomu_config::frequency::FrequencyConfig;
use yomu_core::{DictionaryStore, FrequencyStore, LoadError, WordClassTable};
use yomu_types::DictionaryKind;

use crate::dictionary::MemoryDictionary;
use crate::frequency::FrequencyList;
use crate::word_class::WordClassMap;

pub struct DictionaryLoader;

impl DictionaryLoader {
    /// Load a dictionary from file, choosing the format by its kind
    pub fn load(config: &DictionaryConfig) -> Result<Arc<dyn DictionaryStore>, LoadError> {
        let path = Path::new(&config.path);
        if !path.exists() {
            return Err(LoadError::FileNotFound(config.path.clone()));
        }

        tracing::info!("Loading {} from file: {}", config.name, path.display());
        let json = std::fs::read_to_string(path)?;
        let dict = Self::parse(config, &json)?.with_active(config.active);
        tracing::info!("Loaded {} dictionary entries", dict.entry_count());

        Ok(Arc::new(dict))
    }

    /// Parse already-read dictionary data
    pub fn parse(config: &DictionaryConfig, json: &str) -> Result<MemoryDictionary, LoadError> {
        match config.kind {
            DictionaryKind::Word => {
                MemoryDictionary::from_jmdict_json(&config.name, config.priority, json)
            }
            DictionaryKind::Name => {
                MemoryDictionary::from_jmnedict_json(&config.name, config.priority, json)
            }
            kind => MemoryDictionary::from_records_json(&config.name, kind, config.priority, json),
        }
    }

    pub fn load_frequency(config: &FrequencyConfig) -> Result<Arc<dyn FrequencyStore>, LoadError> {
        let list = FrequencyList::load_from_file(&config.name, Path::new(&config.path))?
            .with_active(config.active);
        Ok(Arc::new(list))
    }

    pub fn load_word_classes(path: &str) -> Result<Arc<dyn WordClassTable>, LoadError> {
        Ok(Arc::new(WordClassMap::load_from_file(Path::new(path))?))
    }
}
