use std::fs;
use std::path::Path;

use anyhow::Context;
use yomu_config::Config;

const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Load the config file given on the command line, else `config.json` in the
/// working directory, else defaults with environment overrides
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => read_config(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            read_config(Path::new(DEFAULT_CONFIG_FILE))
        }
        None => {
            tracing::info!("No config file, using defaults");
            Ok(Config::new())
        }
    }
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&data).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_config(data: &str) -> anyhow::Result<Config> {
    let config: Config = serde_json::from_str(data)?;
    for dict in config.dictionaries.iter().filter(|d| !d.active) {
        tracing::info!("Dictionary {} is disabled", dict.name);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use yomu_types::DictionaryKind;

    use super::*;

    #[test]
    fn parses_a_full_config() {
        let json = r#"{
            "lookup": { "debounce_ms": 50, "kanji_mode": true },
            "dictionaries": [
                { "name": "JMdict", "kind": "word", "path": "jmdict-eng.json", "priority": 1 },
                { "name": "JMnedict", "kind": "name", "path": "jmnedict.json", "priority": 2, "active": false }
            ],
            "frequency": { "name": "JPDB", "path": "jpdb.tsv" },
            "word_classes_path": "classes.json"
        }"#;
        let config = parse_config(json).unwrap();

        assert_eq!(config.lookup.debounce_ms, 50);
        assert_eq!(config.lookup.max_search_length, 37);
        assert!(config.lookup.kanji_mode);
        assert_eq!(config.dictionaries[1].kind, DictionaryKind::Name);
        assert!(config.frequency.as_ref().unwrap().active);
        assert_eq!(config.active_dictionaries().len(), 1);
    }

    #[test]
    fn unknown_dictionary_kind_is_rejected() {
        let json = r#"{ "dictionaries": [ { "name": "x", "kind": "audio", "path": "x" } ] }"#;
        assert!(parse_config(json).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_config(Some(Path::new("/nonexistent/yomu.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/yomu.json"));
    }
}
