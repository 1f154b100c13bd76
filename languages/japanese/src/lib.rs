pub mod deconjugator;
pub mod dictionary;
pub mod frequency;
pub mod kana;
pub mod loader;
pub mod matcher;
pub mod processor;
pub mod ranker;
pub mod rules;
pub mod scanner;
pub mod word_class;

pub use deconjugator::JapaneseDeconjugator;
pub use dictionary::MemoryDictionary;
pub use frequency::FrequencyList;
pub use loader::DictionaryLoader;
pub use matcher::{DictionaryMatcher, IntermediaryResult};
pub use processor::JapaneseProcessor;
pub use ranker::ResultBuilder;
pub use rules::{Rule, RuleKind, RuleTable};
pub use word_class::WordClassMap;
