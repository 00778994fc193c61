//! Form orchestration over a set of validated fields.

use serde::Serialize;

use crate::error::FormError;
use crate::field::{FormValues, ValidatedField};

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Submission {
    /// Every field is valid; the caller proceeds with the request.
    Accepted,
    /// At least one field is invalid; all fields are now touched.
    Rejected,
}

/// An ordered group of fields submitted and reset together.
#[derive(Debug)]
pub struct FormOrchestrator {
    fields: Vec<ValidatedField>,
}

impl FormOrchestrator {
    pub fn new(fields: Vec<ValidatedField>) -> Self {
        Self { fields }
    }

    /// Aggregate validity: every field's `is_valid`, as currently stored.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(ValidatedField::is_valid)
    }

    /// Change a field's value, evaluating its rule against the other fields.
    pub fn change(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let idx = self.index_of(name)?;
        let siblings = self.siblings_of(idx);
        self.fields[idx].on_change_with(value, &siblings);
        Ok(())
    }

    /// Blur a field. The rule is re-run first so that a dependent field
    /// catches up with sibling edits made since its last change.
    pub fn blur(&mut self, name: &str) -> Result<(), FormError> {
        let idx = self.index_of(name)?;
        let siblings = self.siblings_of(idx);
        let field = &mut self.fields[idx];
        field.revalidate(&siblings);
        field.on_blur();
        Ok(())
    }

    /// Validate the whole form.
    ///
    /// On rejection every field is blurred, so all outstanding errors become
    /// visible in one pass.
    pub fn attempt_submit(&mut self) -> Submission {
        if self.is_valid() {
            return Submission::Accepted;
        }
        for field in &mut self.fields {
            field.on_blur();
        }
        tracing::debug!(errors = self.errors().len(), "form submission rejected");
        Submission::Rejected
    }

    /// Reset every field.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
    }

    pub fn field(&self, name: &str) -> Option<&ValidatedField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn fields(&self) -> &[ValidatedField] {
        &self.fields
    }

    /// Current value of a field, or `""` for an unknown name.
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(ValidatedField::value).unwrap_or_default()
    }

    /// `(field, message)` for every field currently showing an error, in field order.
    pub fn errors(&self) -> Vec<(&'static str, &'static str)> {
        self.fields
            .iter()
            .filter_map(|f| f.error().map(|m| (f.name(), m)))
            .collect()
    }

    fn index_of(&self, name: &str) -> Result<usize, FormError> {
        self.fields
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    fn siblings_of(&self, idx: usize) -> FormValues {
        FormValues::new(
            self.fields
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, f)| (f.name(), f.value().to_string()))
                .collect(),
        )
    }
}
