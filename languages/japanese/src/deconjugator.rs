use indexmap::IndexSet;
use yomu_core::{Deconjugator, Form};

use crate::rules::{RuleKind, RuleTable, VirtualRule};

/// Candidate text may grow this many characters past the input
const MAX_GROWTH: usize = 10;
/// Tags a form may carry beyond the input length
const MAX_EXTRA_TAGS: usize = 6;
/// Hard stop for a single search
const MAX_FORMS: usize = 10_000;

/// Breadth-first rule interpreter over [`Form`]s
pub struct JapaneseDeconjugator {
    rules: RuleTable,
}

impl JapaneseDeconjugator {
    /// Deconjugator over the rule table shipped with the crate
    pub fn new() -> Self {
        let rules = RuleTable::load_embedded().unwrap_or_else(|e| {
            tracing::error!("Failed to load deconjugation rules: {}", e);
            tracing::warn!("Starting with an empty rule table");
            RuleTable::default()
        });
        Self { rules }
    }

    pub fn with_rules(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    fn expand(&self, form: &Form, next: &mut IndexSet<Form>, processed: &IndexSet<Form>) {
        for rule in self.rules.iter() {
            for variant in rule.variants() {
                let Some(child) = apply(form, rule.kind, &variant) else {
                    continue;
                };
                if !processed.contains(&child) {
                    next.insert(child);
                }
            }
        }
    }
}

impl Default for JapaneseDeconjugator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deconjugator for JapaneseDeconjugator {
    fn deconjugate(&self, text: &str) -> Vec<Form> {
        if text.is_empty() {
            return Vec::new();
        }

        let root = Form::root(text);
        let mut processed: IndexSet<Form> = IndexSet::from([root.clone()]);
        let mut frontier: IndexSet<Form> = IndexSet::from([root]);

        while !frontier.is_empty() {
            let mut next = IndexSet::new();
            for form in &frontier {
                self.expand(form, &mut next, &processed);
            }

            if processed.len() + next.len() > MAX_FORMS {
                tracing::error!(
                    "Deconjugation of '{}' exceeded {} forms, search stopped",
                    text,
                    MAX_FORMS
                );
                let room = MAX_FORMS.saturating_sub(processed.len());
                processed.extend(next.into_iter().take(room));
                break;
            }

            processed.extend(next.iter().cloned());
            frontier = next;
        }

        tracing::trace!("Deconjugated '{}' into {} forms", text, processed.len() - 1);
        processed.into_iter().skip(1).collect()
    }
}

fn apply(form: &Form, kind: RuleKind, rule: &VirtualRule<'_>) -> Option<Form> {
    match kind {
        RuleKind::Substitution => substitute(form, rule),
        _ => replace_ending(form, kind, rule),
    }
}

fn substitute(form: &Form, rule: &VirtualRule<'_>) -> Option<Form> {
    if !form.process().is_empty() || !form.text().contains(rule.con_end) {
        return None;
    }

    let text = form.text().replace(rule.con_end, rule.dec_end);
    within_bounds(form, &text, form.tags().len()).then(|| form.derive_untagged(text, rule.detail))
}

fn replace_ending(form: &Form, kind: RuleKind, rule: &VirtualRule<'_>) -> Option<Form> {
    let stem = form.text().strip_suffix(rule.con_end)?;
    if form.last_tag().is_some_and(|tag| tag != rule.con_tag) {
        return None;
    }

    let first = form.tags().is_empty();
    let allowed = match kind {
        RuleKind::Rewrite => form.text() == rule.con_end,
        RuleKind::OnlyFinal => first,
        RuleKind::NeverFinal => !first,
        RuleKind::Context(check) => check.allows(form, rule),
        RuleKind::Standard | RuleKind::Substitution => true,
    };
    // a chain has to start with a step that can be shown
    if !allowed || (first && rule.detail.is_empty()) {
        return None;
    }

    let text = format!("{stem}{}", rule.dec_end);
    let tag_count = form.tags().len() + if first { 2 } else { 1 };
    within_bounds(form, &text, tag_count)
        .then(|| form.derive_tagged(text, rule.con_tag, rule.dec_tag, rule.detail))
}

fn within_bounds(form: &Form, text: &str, tag_count: usize) -> bool {
    let original_len = form.original_len();
    // a path never returns to a text it already passed through
    !text.is_empty()
        && text != form.text()
        && !form.has_seen(text)
        && text.chars().count() <= original_len + MAX_GROWTH
        && tag_count <= original_len + MAX_EXTRA_TAGS
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn find<'a>(forms: &'a [Form], text: &str, last_tag: &str) -> Option<&'a Form> {
        forms
            .iter()
            .find(|f| f.text() == text && f.last_tag() == Some(last_tag))
    }

    #[test]
    fn past_ichidan() {
        let forms = JapaneseDeconjugator::new().deconjugate("食べた");
        let form = find(&forms, "食べる", "v1").unwrap();
        assert_eq!(form.process(), ["past"]);
        assert_eq!(form.tags(), ["uninflectable", "v1"]);
    }

    #[test]
    fn chained_auxiliaries() {
        let forms = JapaneseDeconjugator::new().deconjugate("食べさせられた");
        let form = find(&forms, "食べる", "v1").unwrap();
        assert_eq!(form.process(), ["past", "passive/potential", "causative"]);
    }

    #[test]
    fn negative_past_godan() {
        let forms = JapaneseDeconjugator::new().deconjugate("書かなかった");
        let form = find(&forms, "書く", "v5k").unwrap();
        assert_eq!(form.process(), ["past", "negative"]);
    }

    #[test]
    fn polite_forms_pass_through_the_stem() {
        let deconjugator = JapaneseDeconjugator::new();

        let forms = deconjugator.deconjugate("食べました");
        let form = find(&forms, "食べる", "v1").unwrap();
        assert_eq!(form.process(), ["polite past", "(continuative stem)"]);

        let forms = deconjugator.deconjugate("します");
        assert!(find(&forms, "する", "vs-i").is_some());
    }

    #[test]
    fn irregular_verbs() {
        let deconjugator = JapaneseDeconjugator::new();
        assert!(find(&deconjugator.deconjugate("行った"), "行く", "v5k-s").is_some());
        assert!(find(&deconjugator.deconjugate("来なかった"), "来る", "vk").is_some());
        assert!(find(&deconjugator.deconjugate("くれ"), "くれる", "v1").is_some());
    }

    #[test]
    fn bare_input_is_not_an_ichidan_stem() {
        let forms = JapaneseDeconjugator::new().deconjugate("たべ");
        assert!(forms.iter().all(|f| f.text() != "たべる"));
    }

    #[test]
    fn sa_special_rejects_doubled_sa() {
        let via_mizenkei = |forms: &[Form], text: &str| {
            forms.iter().any(|f| {
                f.text() == text && f.process().last().map(String::as_str) == Some("(mizenkei)")
            })
        };
        let deconjugator = JapaneseDeconjugator::new();

        assert!(via_mizenkei(&deconjugator.deconjugate("させる"), "する"));
        assert!(!via_mizenkei(&deconjugator.deconjugate("ささせる"), "さする"));
    }

    #[test]
    fn only_final_rules_start_the_chain() {
        let forms = JapaneseDeconjugator::new().deconjugate("食べろ");
        assert!(find(&forms, "食べる", "v1").is_some());

        // imperative cannot follow another step
        let forms = JapaneseDeconjugator::new().deconjugate("食べろた");
        assert!(find(&forms, "食べる", "v1").is_none());
    }

    #[test]
    fn substitution_only_comes_first() {
        let forms = JapaneseDeconjugator::new().deconjugate("ゐた");
        let form = forms.iter().find(|f| f.text() == "いた").unwrap();
        assert!(form.tags().is_empty());
        assert_eq!(form.process(), ["archaic kana"]);
    }

    #[test]
    fn empty_detail_rule_cannot_come_first() {
        let json = r#"[
            { "kind": "standard", "dec_end": "る", "con_end": "た", "dec_tag": "v1", "con_tag": "uninflectable", "detail": "" },
            { "kind": "standard", "dec_end": "た", "con_end": "たら", "dec_tag": "uninflectable", "con_tag": "uninflectable", "detail": "conditional" }
        ]"#;
        let deconjugator = JapaneseDeconjugator::with_rules(RuleTable::from_json(json).unwrap());

        assert!(deconjugator.deconjugate("たべた").is_empty());

        let forms = deconjugator.deconjugate("たべたら");
        let form = find(&forms, "たべる", "v1").unwrap();
        assert_eq!(form.process(), ["conditional", ""]);
    }

    #[test]
    fn growth_is_bounded() {
        let json = r#"[{ "kind": "standard", "dec_end": "ああ", "con_end": "あ", "dec_tag": "x", "con_tag": "x", "detail": "grow" }]"#;
        let deconjugator = JapaneseDeconjugator::with_rules(RuleTable::from_json(json).unwrap());

        let forms = deconjugator.deconjugate("あ");
        assert!(!forms.is_empty());
        assert!(forms.iter().all(|f| f.len() <= 1 + MAX_GROWTH));
        assert!(forms.iter().all(|f| f.tags().len() <= 1 + MAX_EXTRA_TAGS));
    }

    #[test]
    fn search_stops_at_the_form_limit() {
        // five ways to grow at every step, 5^6 forms at depth six
        let json = r#"[{ "kind": "standard", "dec_end": ["か", "き", "く", "け", "こ"], "con_end": "",
                         "dec_tag": "x", "con_tag": "x", "detail": "grow" }]"#;
        let deconjugator = JapaneseDeconjugator::with_rules(RuleTable::from_json(json).unwrap());

        let forms = deconjugator.deconjugate("あ");
        assert_eq!(forms.len(), MAX_FORMS - 1);
        let unique: HashSet<&str> = forms.iter().map(|f| f.text()).collect();
        assert_eq!(unique.len(), forms.len());
    }

    #[test]
    fn empty_input_has_no_forms() {
        assert!(JapaneseDeconjugator::new().deconjugate("").is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn search_terminates_with_unique_forms(s in "[\\u{3041}-\\u{3093}]{1,8}") {
            let forms = JapaneseDeconjugator::new().deconjugate(&s);
            let unique: HashSet<(&str, &[String])> =
                forms.iter().map(|f| (f.text(), f.tags())).collect();

            prop_assert_eq!(unique.len(), forms.len());
            prop_assert!(forms.len() <= MAX_FORMS);
            prop_assert!(forms.iter().all(|f| !f.is_empty() && !f.process().is_empty()));
        }
    }
}
