use unicode_normalization::UnicodeNormalization;

const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

pub trait Preprocessor {
    // Default JP preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Captured Japanese text wraps without spaces, so line breaks are dropped, not replaced
        text.nfkc()
            .filter(|c| !matches!(c, '\n' | '\r') && !ZERO_WIDTH.contains(c))
            .collect::<String>()
            .trim()
            .to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_wrapped_lines() {
        assert_eq!(DefaultPreprocessor.process("  食べ\r\nました \n"), "食べました");
    }

    #[test]
    fn folds_compatibility_characters() {
        // half-width katakana with a separate voicing mark
        assert_eq!(DefaultPreprocessor.process("ｶﾞｯｺｳ"), "ガッコウ");
        assert_eq!(DefaultPreprocessor.process("\u{FEFF}ＡＢＣ"), "ABC");
    }

    #[test]
    fn blank_input_stays_empty() {
        assert_eq!(DefaultPreprocessor.process(" \n "), "");
    }
}
