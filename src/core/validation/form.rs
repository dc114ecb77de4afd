//! Editable form state for create/edit pages
//!
//! Holds the in-progress payload, applies path-shaped edits as structural
//! copies, and keeps the error map of the latest submit attempt. Errors are
//! only recomputed on submit; editing a field clears that field's message so
//! the inline error disappears once the user starts correcting it.

use super::engine::{ErrorMap, ValidationResult, validate_payload};
use super::rule::FieldRule;
use crate::core::error::SUBMISSION_BANNER;
use crate::core::path::{get_at_path, set_at_path};
use serde_json::Value;

/// Local state of one form
#[derive(Debug, Clone)]
pub struct FormState {
    initial: Value,
    payload: Value,
    errors: ErrorMap,
    submitted: bool,
}

impl FormState {
    /// Start from an initial payload (empty object for create pages, the
    /// fetched record for edit pages)
    pub fn new(initial: Value) -> Self {
        Self {
            payload: initial.clone(),
            initial,
            errors: ErrorMap::new(),
            submitted: false,
        }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Value currently held at `path`
    pub fn value(&self, path: &str) -> Option<&Value> {
        get_at_path(&self.payload, path)
    }

    /// Write `value` at `path`
    ///
    /// Clears the message for `path` and for every path nested under it, since
    /// the whole subtree was replaced.
    pub fn edit(&mut self, path: &str, value: Value) {
        self.payload = set_at_path(&self.payload, path, value);
        let nested = format!("{}.", path);
        self.errors.retain(|key, _| key != path && !key.starts_with(&nested));
    }

    /// Validate the current payload against `rules`
    ///
    /// The rule list is usually rebuilt from the payload right before the
    /// call, since which rules apply depends on discriminant fields.
    pub fn submit(&mut self, rules: &[FieldRule]) -> ValidationResult {
        let result = validate_payload(rules, &self.payload);
        self.errors = result.error_map.clone();
        self.submitted = true;
        result
    }

    /// Inline message for `path` from the latest submit attempt
    pub fn error_for(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Aggregate banner, shown while the latest submit left errors behind
    pub fn banner(&self) -> Option<&'static str> {
        (self.submitted && !self.errors.is_empty()).then_some(SUBMISSION_BANNER)
    }

    /// Whether the payload differs from the initial one
    pub fn is_dirty(&self) -> bool {
        self.payload != self.initial
    }

    /// Discard edits and errors
    pub fn reset(&mut self) {
        self.payload = self.initial.clone();
        self.errors.clear();
        self.submitted = false;
    }
}
