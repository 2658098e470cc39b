use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use dioxus::prelude::*;

/// One field's value. Selects carry lookup ids, the file input a picked path.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    Choice(Option<i64>),
    Multi(Vec<i64>),
    File(Option<PathBuf>),
}

impl FormValue {
    pub fn as_text(&self) -> &str {
        match self {
            FormValue::Text(text) => text,
            _ => "",
        }
    }

    pub fn as_choice(&self) -> Option<i64> {
        match self {
            FormValue::Choice(choice) => *choice,
            _ => None,
        }
    }

    pub fn as_multi(&self) -> &[i64] {
        match self {
            FormValue::Multi(ids) => ids,
            _ => &[],
        }
    }

    pub fn as_file(&self) -> Option<&PathBuf> {
        match self {
            FormValue::File(path) => path.as_ref(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FormValue::Text(text) => text.trim().is_empty(),
            FormValue::Choice(choice) => choice.is_none(),
            FormValue::Multi(ids) => ids.is_empty(),
            FormValue::File(path) => path.is_none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Required,
    Email,
    MinLen(usize),
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: RuleKind,
}

impl FieldRule {
    pub const fn required(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: RuleKind::Required,
        }
    }

    pub const fn email(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: RuleKind::Email,
        }
    }

    pub const fn min_len(name: &'static str, label: &'static str, min: usize) -> Self {
        Self {
            name,
            label,
            kind: RuleKind::MinLen(min),
        }
    }

    pub const fn numeric(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: RuleKind::Numeric,
        }
    }
}

/// Checks one rule against one value. Non-required rules pass on empty
/// values; `Required` is the only rule that rejects emptiness.
pub fn rule_error(label: &str, value: &FormValue, kind: RuleKind) -> Option<String> {
    match kind {
        RuleKind::Required => value
            .is_empty()
            .then(|| format!("{label} is required")),
        RuleKind::Email => {
            let text = value.as_text().trim();
            if text.is_empty() {
                return None;
            }
            let valid = text
                .split_once('@')
                .is_some_and(|(user, host)| !user.is_empty() && host.contains('.'));
            (!valid).then(|| format!("{label} must be a valid email address"))
        }
        RuleKind::MinLen(min) => {
            let text = value.as_text().trim();
            (!text.is_empty() && text.len() < min)
                .then(|| format!("{label} must be at least {min} characters"))
        }
        RuleKind::Numeric => {
            let text = value.as_text().trim();
            (!text.is_empty() && text.parse::<f64>().is_err())
                .then(|| format!("{label} must be a number"))
        }
    }
}

/// Shared form state provided through context so leaf inputs bind by field
/// name instead of prop wiring. Error text is only shown for touched fields.
#[derive(Clone, Copy)]
pub struct FormState {
    pub values: Signal<BTreeMap<String, FormValue>>,
    pub errors: Signal<BTreeMap<String, String>>,
    pub touched: Signal<BTreeSet<String>>,
    pub submitting: Signal<bool>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            values: use_signal(BTreeMap::new),
            errors: use_signal(BTreeMap::new),
            touched: use_signal(BTreeSet::new),
            submitting: use_signal(|| false),
        }
    }

    /// Registers the form in context for the subtree being rendered.
    pub fn provide() -> Self {
        let form = Self::new();
        use_context_provider(|| form)
    }

    pub fn use_form() -> Self {
        use_context::<FormState>()
    }

    pub fn value(&self, name: &str) -> FormValue {
        self.values
            .read()
            .get(name)
            .cloned()
            .unwrap_or(FormValue::Text(String::new()))
    }

    pub fn text(&self, name: &str) -> String {
        self.value(name).as_text().to_string()
    }

    pub fn set_value(&mut self, name: &str, value: FormValue) {
        self.values.write().insert(name.to_string(), value);
    }

    pub fn set_touched(&mut self, name: &str) {
        self.touched.write().insert(name.to_string());
    }

    pub fn set_error(&mut self, name: &str, message: String) {
        self.errors.write().insert(name.to_string(), message);
    }

    pub fn clear_error(&mut self, name: &str) {
        self.errors.write().remove(name);
    }

    /// Error text for display: present only when the field has both an error
    /// and has been touched.
    pub fn visible_error(&self, name: &str) -> Option<String> {
        if !self.touched.read().contains(name) {
            return None;
        }
        self.errors.read().get(name).cloned()
    }

    pub fn is_submitting(&self) -> bool {
        (self.submitting)()
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting.set(submitting);
    }

    /// Seeds values for an edit drawer.
    pub fn load(&mut self, values: BTreeMap<String, FormValue>) {
        *self.values.write() = values;
        self.errors.write().clear();
        self.touched.write().clear();
    }

    pub fn reset(&mut self) {
        self.load(BTreeMap::new());
    }

    /// Runs every rule, marks all named fields touched so their errors show,
    /// and reports whether submission may proceed. A failed validation never
    /// reaches the network.
    pub fn validate(&mut self, rules: &[FieldRule]) -> bool {
        let mut failures = BTreeMap::new();
        for rule in rules {
            let value = self.value(rule.name);
            if failures.contains_key(rule.name) {
                continue;
            }
            if let Some(message) = rule_error(rule.label, &value, rule.kind) {
                failures.insert(rule.name.to_string(), message);
            }
        }
        {
            let mut touched = self.touched.write();
            for rule in rules {
                touched.insert(rule.name.to_string());
            }
        }
        let ok = failures.is_empty();
        *self.errors.write() = failures;
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_empty_values() {
        let error = rule_error("Name", &FormValue::Text("  ".to_string()), RuleKind::Required);
        assert_eq!(error.as_deref(), Some("Name is required"));

        let error = rule_error("Name", &FormValue::Text("Dana".to_string()), RuleKind::Required);
        assert_eq!(error, None);
    }

    #[test]
    fn required_covers_selects_and_files() {
        assert!(rule_error("Project", &FormValue::Choice(None), RuleKind::Required).is_some());
        assert!(rule_error("Project", &FormValue::Choice(Some(3)), RuleKind::Required).is_none());
        assert!(rule_error("Document", &FormValue::File(None), RuleKind::Required).is_some());
        assert!(rule_error("Tags", &FormValue::Multi(vec![]), RuleKind::Required).is_some());
    }

    #[test]
    fn email_shape_is_checked_only_when_present() {
        assert!(rule_error("Email", &FormValue::Text(String::new()), RuleKind::Email).is_none());
        assert!(
            rule_error("Email", &FormValue::Text("nope".to_string()), RuleKind::Email).is_some()
        );
        assert!(rule_error(
            "Email",
            &FormValue::Text("a@b.com".to_string()),
            RuleKind::Email
        )
        .is_none());
        assert!(
            rule_error("Email", &FormValue::Text("a@b".to_string()), RuleKind::Email).is_some(),
            "host without a dot should fail"
        );
    }

    #[test]
    fn numeric_and_min_len_rules() {
        assert!(
            rule_error("Year", &FormValue::Text("20x1".to_string()), RuleKind::Numeric).is_some()
        );
        assert!(
            rule_error("Year", &FormValue::Text("2021".to_string()), RuleKind::Numeric).is_none()
        );
        assert!(rule_error(
            "Password",
            &FormValue::Text("abc".to_string()),
            RuleKind::MinLen(8)
        )
        .is_some());
        assert!(rule_error(
            "Password",
            &FormValue::Text("abcdefgh".to_string()),
            RuleKind::MinLen(8)
        )
        .is_none());
    }
}
