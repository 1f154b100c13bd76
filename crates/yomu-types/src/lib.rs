pub mod types;

pub use types::{DictionaryKind, KanjiDetails, LookupResult, UNRANKED};
