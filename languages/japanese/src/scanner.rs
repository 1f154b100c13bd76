use yomu_core::{Deconjugator, Form};

use crate::kana::katakana_to_hiragana;

/// One truncated prefix of the query
#[derive(Debug, Clone)]
pub struct Window {
    /// The prefix as the caller wrote it
    pub text: String,
    pub hiragana: String,
    /// Empty unless a conjugation-sensitive dictionary is active
    pub deconjugations: Vec<Form>,
}

impl Window {
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Every prefix of `text`, longest first. No length is skipped.
pub fn scan(text: &str, deconjugator: Option<&dyn Deconjugator>) -> Vec<Window> {
    let ends: Vec<usize> = text
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .collect();

    let windows: Vec<Window> = ends
        .iter()
        .rev()
        .map(|&end| {
            let text = &text[..end];
            let hiragana = katakana_to_hiragana(text);
            let deconjugations = deconjugator
                .map(|d| d.deconjugate(&hiragana))
                .unwrap_or_default();
            Window {
                text: text.to_string(),
                hiragana,
                deconjugations,
            }
        })
        .collect();

    tracing::debug!(
        "Scanned {} windows, {} deconjugated forms",
        windows.len(),
        windows.iter().map(|w| w.deconjugations.len()).sum::<usize>()
    );
    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JapaneseDeconjugator;

    #[test]
    fn windows_shrink_one_character_at_a_time() {
        let windows = scan("タベタ", None);
        let texts: Vec<&str> = windows.iter().map(|w| w.text.as_str()).collect();
        let hiragana: Vec<&str> = windows.iter().map(|w| w.hiragana.as_str()).collect();

        assert_eq!(texts, vec!["タベタ", "タベ", "タ"]);
        assert_eq!(hiragana, vec!["たべた", "たべ", "た"]);
        assert!(windows.iter().all(|w| w.deconjugations.is_empty()));
    }

    #[test]
    fn supplementary_plane_characters_stay_whole() {
        let windows = scan("𠮟る", None);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[1].text, "𠮟");
    }

    #[test]
    fn deconjugates_each_window() {
        let deconjugator = JapaneseDeconjugator::new();
        let windows = scan("食べた", Some(&deconjugator));

        assert!(windows[0].deconjugations.iter().any(|f| f.text() == "食べる"));
        assert_eq!(windows[0].len(), 3);
    }

    #[test]
    fn empty_text_has_no_windows() {
        assert!(scan("", None).is_empty());
    }
}
