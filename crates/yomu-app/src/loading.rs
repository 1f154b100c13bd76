use std::sync::{Arc, PoisonError};

use anyhow::Context;
use tokio::task;
use yomu_core::state::AppState;
use yomu_lang_japanese::DictionaryLoader;

/// Load every active dictionary, the frequency list and the word-class table
/// on blocking tasks and publish them into `state`. A resource that fails to
/// load is logged and left out.
pub async fn load_all(state: &Arc<AppState>) -> anyhow::Result<()> {
    let config = state
        .config
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();

    let dictionaries: Vec<_> = config
        .active_dictionaries()
        .into_iter()
        .cloned()
        .map(|dict| {
            task::spawn_blocking(move || {
                let result = DictionaryLoader::load(&dict);
                (dict.name, result)
            })
        })
        .collect();

    let frequency = config
        .frequency
        .clone()
        .filter(|f| f.active)
        .map(|f| task::spawn_blocking(move || DictionaryLoader::load_frequency(&f)));

    let word_classes = config
        .word_classes_path
        .clone()
        .map(|path| task::spawn_blocking(move || DictionaryLoader::load_word_classes(&path)));

    for handle in dictionaries {
        let (name, result) = handle.await.context("dictionary loader task failed")?;
        match result {
            Ok(store) => state.dictionaries.replace(store),
            Err(e) => tracing::warn!("Failed to load dictionary {}: {}", name, e),
        }
    }

    if let Some(handle) = frequency {
        match handle.await.context("frequency loader task failed")? {
            Ok(list) => state.set_frequency(Some(list)),
            Err(e) => tracing::warn!("Failed to load frequency list: {}", e),
        }
    }

    if let Some(handle) = word_classes {
        match handle.await.context("word class loader task failed")? {
            Ok(table) => state.set_word_classes(Some(table)),
            Err(e) => tracing::warn!("Failed to load word classes: {}", e),
        }
    }

    if state.dictionaries.is_empty() {
        tracing::warn!("No dictionaries loaded, every lookup will be empty");
    } else {
        tracing::info!("{} dictionaries ready", state.dictionaries.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use yomu_config::Config;
    use yomu_config::dictionary::DictionaryConfig;
    use yomu_types::DictionaryKind;

    use super::*;

    #[tokio::test]
    async fn missing_files_are_skipped() {
        let config = Config {
            dictionaries: vec![DictionaryConfig::new(
                "JMdict",
                DictionaryKind::Word,
                "/nonexistent/jmdict.json",
                1,
            )],
            word_classes_path: Some("/nonexistent/classes.json".to_string()),
            ..Config::default()
        };
        let state = Arc::new(AppState::new(config));

        load_all(&state).await.unwrap();
        assert!(state.dictionaries.is_empty());
        assert!(state.context().word_classes.is_none());
    }
}
