use yomu_types::DictionaryKind;

/// Failure to read a dictionary, frequency list, word-class table or rule table
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A single deconjugation rule that cannot be used
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("unknown rule kind '{0}'")]
    UnknownKind(String),

    #[error("unknown context check '{0}'")]
    UnknownContext(String),

    #[error("rule '{detail}' is missing field '{field}'")]
    MissingField { detail: String, field: &'static str },

    #[error("rule '{detail}' has parallel lists of different lengths")]
    MismatchedVariants { detail: String },

    #[error("substitution rule '{detail}' has an empty pattern")]
    EmptyPattern { detail: String },

    #[error("rule could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The only failure a lookup reports to its caller
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(
        "dictionary '{dictionary}' ({expected:?}) returned a {found} record for key '{key}'"
    )]
    InconsistentStore {
        dictionary: String,
        key: String,
        expected: DictionaryKind,
        found: &'static str,
    },
}
