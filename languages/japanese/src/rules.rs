use serde::Deserialize;
use yomu_core::{Form, LoadError, RuleError};

/// Ending or tag field of a rule: one value, or one value per parallel variant
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Endings {
    Scalar(String),
    Parallel(Vec<String>),
}

impl Endings {
    fn parallel_len(&self) -> Option<usize> {
        match self {
            Endings::Scalar(_) => None,
            Endings::Parallel(values) => Some(values.len()),
        }
    }

    /// Value for variant `index`; scalars apply to every variant
    fn get(&self, index: usize) -> &str {
        match self {
            Endings::Scalar(value) => value,
            Endings::Parallel(values) => values.get(index).map(String::as_str).unwrap_or(""),
        }
    }

    fn is_empty_at(&self, index: usize) -> bool {
        self.get(index).is_empty()
    }
}

impl Default for Endings {
    fn default() -> Self {
        Endings::Scalar(String::new())
    }
}

/// Extra condition a context rule checks before it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextCheck {
    /// The bare input is never read as an ichidan stem; only a stem produced by
    /// an earlier rule may take る back
    V1InfinitiveTrap,
    /// The stem left after removing the ending must not itself end in さ
    SaSpecial,
}

impl ContextCheck {
    fn parse(name: &str) -> Result<Self, RuleError> {
        match name {
            "v1_infinitive_trap" => Ok(ContextCheck::V1InfinitiveTrap),
            "sa_special" => Ok(ContextCheck::SaSpecial),
            other => Err(RuleError::UnknownContext(other.to_string())),
        }
    }

    pub fn allows(&self, form: &Form, rule: &VirtualRule<'_>) -> bool {
        match self {
            ContextCheck::V1InfinitiveTrap => !form.tags().is_empty(),
            ContextCheck::SaSpecial => form
                .text()
                .strip_suffix(rule.con_end)
                .is_some_and(|stem| !stem.ends_with('さ')),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Suffix replacement gated on the ending and the last tag
    Standard,
    /// Standard, but the whole text must equal the conjugated ending
    Rewrite,
    /// Standard, only as the first rule applied
    OnlyFinal,
    /// Standard, never as the first rule applied
    NeverFinal,
    /// Standard, gated by an extra check
    Context(ContextCheck),
    /// Replace every occurrence of a pattern, only before any other rule
    Substitution,
}

/// One entry of the rule table, possibly standing for several parallel variants
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: RuleKind,
    pub dec_end: Endings,
    pub con_end: Endings,
    pub dec_tag: Endings,
    pub con_tag: Endings,
    pub detail: String,
    variants: usize,
}

/// A single variant of a [`Rule`], all fields resolved to one value
#[derive(Debug, Clone, Copy)]
pub struct VirtualRule<'a> {
    pub dec_end: &'a str,
    pub con_end: &'a str,
    pub dec_tag: &'a str,
    pub con_tag: &'a str,
    pub detail: &'a str,
}

impl Rule {
    pub fn variant_count(&self) -> usize {
        self.variants
    }

    pub fn variants(&self) -> impl Iterator<Item = VirtualRule<'_>> {
        (0..self.variants).map(move |i| VirtualRule {
            dec_end: self.dec_end.get(i),
            con_end: self.con_end.get(i),
            dec_tag: self.dec_tag.get(i),
            con_tag: self.con_tag.get(i),
            detail: &self.detail,
        })
    }
}

#[derive(Deserialize)]
struct RawRule {
    kind: String,
    #[serde(default)]
    context: Option<String>,
    dec_end: Option<Endings>,
    con_end: Option<Endings>,
    dec_tag: Option<Endings>,
    con_tag: Option<Endings>,
    #[serde(default)]
    detail: String,
}

impl TryFrom<RawRule> for Rule {
    type Error = RuleError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let detail = raw.detail;
        let missing = |field: &'static str| RuleError::MissingField {
            detail: detail.clone(),
            field,
        };

        let kind = match raw.kind.as_str() {
            "standard" => RuleKind::Standard,
            "rewrite" => RuleKind::Rewrite,
            "only_final" => RuleKind::OnlyFinal,
            "never_final" => RuleKind::NeverFinal,
            "substitution" => RuleKind::Substitution,
            "context" => {
                let name = raw.context.as_deref().ok_or_else(|| missing("context"))?;
                RuleKind::Context(ContextCheck::parse(name)?)
            }
            other => return Err(RuleError::UnknownKind(other.to_string())),
        };

        let dec_end = raw.dec_end.ok_or_else(|| missing("dec_end"))?;
        let con_end = raw.con_end.ok_or_else(|| missing("con_end"))?;
        let (dec_tag, con_tag) = match kind {
            RuleKind::Substitution => (Endings::default(), Endings::default()),
            _ => (
                raw.dec_tag.ok_or_else(|| missing("dec_tag"))?,
                raw.con_tag.ok_or_else(|| missing("con_tag"))?,
            ),
        };

        let lengths: Vec<usize> = [&dec_end, &con_end, &dec_tag, &con_tag]
            .iter()
            .filter_map(|e| e.parallel_len())
            .collect();
        let variants = lengths.first().copied().unwrap_or(1);
        if variants == 0 || lengths.iter().any(|&len| len != variants) {
            return Err(RuleError::MismatchedVariants { detail });
        }

        if kind == RuleKind::Substitution && (0..variants).any(|i| con_end.is_empty_at(i)) {
            return Err(RuleError::EmptyPattern { detail });
        }

        Ok(Rule {
            kind,
            dec_end,
            con_end,
            dec_tag,
            con_tag,
            detail,
            variants,
        })
    }
}

/// The deconjugation rules, read once and never modified
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Load the rule table shipped with the crate
    pub fn load_embedded() -> Result<Self, LoadError> {
        let json = include_str!("../data/deconjugator.json");
        tracing::info!("Loading embedded deconjugation rules...");
        let table = Self::from_json(json)?;
        tracing::info!("Loaded {} deconjugation rules", table.len());
        Ok(table)
    }

    /// Parse a JSON array of rules. Rules that cannot be used are logged and
    /// skipped; only a document that is not an array fails.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;

        let rules = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let parsed = serde_json::from_value::<RawRule>(value)
                    .map_err(RuleError::from)
                    .and_then(Rule::try_from);
                match parsed {
                    Ok(rule) => Some(rule),
                    Err(e) => {
                        tracing::warn!("Skipping deconjugation rule #{index}: {e}");
                        None
                    }
                }
            })
            .collect();

        Ok(Self { rules })
    }

    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
