//! Validated input fields.
//!
//! A field tracks one input's value, whether that value satisfies the
//! field's rule, and whether the user has left the input (`touched`). An
//! error is only shown once both conditions line up, see
//! [`ValidatedField::input_is_invalid`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Snapshot of one field's state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldState {
    pub value: String,
    pub is_valid: bool,
    pub touched: bool,
}

/// Current values of the other fields of a form, by name.
///
/// Rules that depend on a sibling (confirm-password) read it from here.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    entries: Vec<(&'static str, String)>,
}

impl FormValues {
    pub fn new(entries: Vec<(&'static str, String)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

type Rule = Box<dyn Fn(&str, &FormValues) -> bool + Send + Sync>;

/// One input checked against a rule.
pub struct ValidatedField {
    name: &'static str,
    message: &'static str,
    rule: Rule,
    state: FieldState,
}

impl ValidatedField {
    /// A field validated by `predicate` alone.
    ///
    /// `message` is what the screen shows while [`input_is_invalid`](Self::input_is_invalid).
    pub fn new<P>(name: &'static str, message: &'static str, predicate: P) -> Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::dependent(name, message, move |value, _| predicate(value))
    }

    /// A field whose rule also reads sibling values at evaluation time.
    pub fn dependent<P>(name: &'static str, message: &'static str, predicate: P) -> Self
    where
        P: Fn(&str, &FormValues) -> bool + Send + Sync + 'static,
    {
        let rule: Rule = Box::new(predicate);
        let is_valid = rule("", &FormValues::default());
        Self {
            name,
            message,
            rule,
            state: FieldState {
                value: String::new(),
                is_valid,
                touched: false,
            },
        }
    }

    /// Set the value and re-run the rule with no sibling context.
    pub fn on_change(&mut self, value: impl Into<String>) {
        self.on_change_with(value, &FormValues::default());
    }

    /// Set the value and re-run the rule against `siblings`.
    pub fn on_change_with(&mut self, value: impl Into<String>, siblings: &FormValues) {
        self.state.value = value.into();
        self.revalidate(siblings);
    }

    /// Mark the field as visited. Idempotent.
    pub fn on_blur(&mut self) {
        self.state.touched = true;
    }

    /// Re-run the rule on the current value.
    pub fn revalidate(&mut self, siblings: &FormValues) {
        self.state.is_valid = (self.rule)(&self.state.value, siblings);
    }

    /// Return to the freshly constructed state.
    pub fn reset(&mut self) {
        self.state.value.clear();
        self.state.touched = false;
        self.revalidate(&FormValues::default());
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn value(&self) -> &str {
        &self.state.value
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid
    }

    pub fn touched(&self) -> bool {
        self.state.touched
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Whether the screen should render this field's error.
    pub fn input_is_invalid(&self) -> bool {
        self.state.touched && !self.state.is_valid
    }

    /// The error message, if one should currently be shown.
    pub fn error(&self) -> Option<&'static str> {
        self.input_is_invalid().then_some(self.message)
    }
}

impl fmt::Debug for ValidatedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedField")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
