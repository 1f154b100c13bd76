use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::frequency::FrequencyConfig;
use self::lookup::LookupConfig;

pub mod dictionary;
pub mod frequency;
pub mod lookup;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lookup: LookupConfig,
    pub dictionaries: Vec<DictionaryConfig>,
    pub frequency: Option<FrequencyConfig>,
    /// Fallback word classes for dictionaries that carry none
    pub word_classes_path: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Config {
            lookup: LookupConfig::new(),
            dictionaries: vec![],
            frequency: None,
            word_classes_path: None,
        }
    }

    /// Active dictionaries, lowest priority value first
    pub fn active_dictionaries(&self) -> Vec<&DictionaryConfig> {
        let mut active: Vec<&DictionaryConfig> =
            self.dictionaries.iter().filter(|d| d.active).collect();
        active.sort_by_key(|d| d.priority);
        active
    }
}
