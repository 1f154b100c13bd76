pub mod deconjugation;
pub mod dictionary;
pub mod error;
pub mod language;
pub mod lookup;
pub mod preprocess;
pub mod state;

pub use deconjugation::{Deconjugator, Form};
pub use dictionary::{
    CustomEntry, DictionaryRegistry, DictionaryStore, FrequencyRecord, FrequencyStore, KanjiEntry,
    NameEntry, RawRecord, WordClassTable, WordEntry, WordSense,
};
pub use error::{LoadError, LookupError, RuleError};
pub use language::{LanguageProcessor, LookupOutcome};
pub use lookup::{Debouncer, LookupContext};
