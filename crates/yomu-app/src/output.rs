use yomu_types::{LookupResult, UNRANKED};

/// Plain-text rendering, one block per result
pub fn render_text(results: &[LookupResult]) -> String {
    if results.is_empty() {
        return "No results\n".to_string();
    }

    results.iter().map(render_block).collect()
}

fn render_block(result: &LookupResult) -> String {
    let mut header = result.primary_spelling.clone();
    if !result.readings.is_empty() {
        header.push_str(&format!(" 【{}】", result.readings.join("・")));
    }
    header.push_str(&format!(
        "  [{}] matched {}",
        result.dictionary_name, result.matched_text
    ));
    if let Some(process) = &result.deconjugation_process {
        header.push_str(&format!(" {process}"));
    }
    if result.frequency != UNRANKED {
        header.push_str(&format!(" #{}", result.frequency));
    }

    format!("{header}\n    {}\n", result.formatted_definitions)
}

pub fn render_json(results: &[LookupResult]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

#[cfg(test)]
mod tests {
    use yomu_types::DictionaryKind;

    use super::*;

    fn taberu() -> LookupResult {
        LookupResult {
            primary_spelling: "食べる".to_string(),
            readings: vec!["たべる".to_string()],
            alternative_spellings: vec![],
            primary_spelling_orthography_info: vec![],
            readings_orthography_info: vec![],
            alternative_spellings_orthography_info: vec![],
            formatted_definitions: "(1) (v1, vt) to eat".to_string(),
            matched_text: "食べた".to_string(),
            deconjugated_matched_text: "食べる".to_string(),
            frequency: 120,
            dictionary_kind: DictionaryKind::Word,
            dictionary_name: "JMdict".to_string(),
            deconjugation_process: Some("～past".to_string()),
            kanji: None,
        }
    }

    #[test]
    fn text_block() {
        assert_eq!(
            render_text(&[taberu()]),
            "食べる 【たべる】  [JMdict] matched 食べた ～past #120\n    (1) (v1, vt) to eat\n"
        );
        assert_eq!(render_text(&[]), "No results\n");
    }

    #[test]
    fn optional_parts_are_left_out() {
        let bare = LookupResult {
            readings: vec![],
            deconjugation_process: None,
            frequency: UNRANKED,
            matched_text: "食べる".to_string(),
            ..taberu()
        };
        assert_eq!(
            render_text(&[bare, taberu()]),
            "食べる  [JMdict] matched 食べる\n    (1) (v1, vt) to eat\n\
             食べる 【たべる】  [JMdict] matched 食べた ～past #120\n    (1) (v1, vt) to eat\n"
        );
    }

    #[test]
    fn json_keeps_every_field() {
        let json = render_json(&[taberu()]).unwrap();
        let parsed: Vec<LookupResult> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![taberu()]);
        assert!(json.contains("\"dictionary_kind\": \"word\""));
    }
}
