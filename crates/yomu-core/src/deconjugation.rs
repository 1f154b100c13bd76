use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Converts a conjugated string into the candidate dictionary forms it may come from
pub trait Deconjugator: Send + Sync {
    /// Every form reachable from `text`, excluding `text` itself
    fn deconjugate(&self, text: &str) -> Vec<Form>;
}

/// A node of the deconjugation search.
///
/// Identity is `(text, tags)`. `seen_text` and `process` record how the node was
/// reached and take no part in equality or hashing, so two paths arriving at the
/// same text with the same tags collapse into one node.
#[derive(Debug, Clone)]
pub struct Form {
    text: String,
    original_text: Arc<str>,
    tags: Vec<String>,
    seen_text: HashSet<String>,
    process: Vec<String>,
}

impl Form {
    /// The untouched input of a search
    pub fn root(text: &str) -> Self {
        Self {
            text: text.to_string(),
            original_text: Arc::from(text),
            tags: Vec::new(),
            seen_text: HashSet::new(),
            process: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Grammatical class of `text` as established by the last rule, if any
    pub fn last_tag(&self) -> Option<&str> {
        self.tags.last().map(String::as_str)
    }

    pub fn process(&self) -> &[String] {
        &self.process
    }

    pub fn has_seen(&self, text: &str) -> bool {
        self.seen_text.contains(text)
    }

    /// Length of `text` in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn original_len(&self) -> usize {
        self.original_text.chars().count()
    }

    /// Child produced by an ending rule. A root first receives `con_tag`, then
    /// every child receives `dec_tag`.
    pub fn derive_tagged(&self, text: String, con_tag: &str, dec_tag: &str, detail: &str) -> Self {
        let mut tags = self.tags.clone();
        if tags.is_empty() {
            tags.push(con_tag.to_string());
        }
        tags.push(dec_tag.to_string());
        self.derive(text, tags, detail)
    }

    /// Child produced by a text substitution; tags carry over unchanged
    pub fn derive_untagged(&self, text: String, detail: &str) -> Self {
        self.derive(text, self.tags.clone(), detail)
    }

    fn derive(&self, text: String, tags: Vec<String>, detail: &str) -> Self {
        let mut seen_text = self.seen_text.clone();
        if seen_text.is_empty() {
            seen_text.insert(self.text.clone());
        }
        seen_text.insert(text.clone());

        let mut process = self.process.clone();
        process.push(detail.to_string());

        Self {
            text,
            original_text: Arc::clone(&self.original_text),
            tags,
            seen_text,
            process,
        }
    }
}

impl PartialEq for Form {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.tags == other.tags
    }
}

impl Eq for Form {}

impl Hash for Form {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.tags.hash(state);
    }
}
