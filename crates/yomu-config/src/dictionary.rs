use serde::{Deserialize, Serialize};
use yomu_types::DictionaryKind;

fn default_active() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DictionaryConfig {
    pub name: String,
    pub kind: DictionaryKind,
    pub path: String,
    /// Lower sorts first among results of equal length
    #[serde(default)]
    pub priority: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl DictionaryConfig {
    pub fn new(name: &str, kind: DictionaryKind, path: &str, priority: u32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            path: path.to_string(),
            priority,
            active: default_active(),
        }
    }
}
