use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FrequencyConfig {
    pub name: String,
    /// TSV file, `spelling\trank[\treading]` per line
    pub path: String,
    #[serde(default = "default_active")]
    pub active: bool,
}
