//! Rule-list evaluation

use super::rule::FieldRule;
use crate::core::error::ValidationError;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Dotted path → message of the first failing rule for that path
///
/// Iteration follows the order in which paths first failed.
pub type ErrorMap = IndexMap<String, String>;

/// Outcome of running a rule list against a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff every rule passed
    pub is_valid: bool,
    pub error_map: ErrorMap,
}

impl ValidationResult {
    /// Message recorded for `path`, if any
    pub fn error_for(&self, path: &str) -> Option<&str> {
        self.error_map.get(path).map(String::as_str)
    }

    /// `Ok(())` when valid, otherwise the error map as a rejection
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ValidationError::Rejected {
                error_map: self.error_map,
            })
        }
    }
}

/// Evaluate every rule against `payload`
///
/// All rules run, in order. A path keeps the message of its first failing
/// rule; later failures on that path still make the result invalid.
///
/// # Examples
///
/// ```
/// use fleetdesk::core::validation::{validate_payload, validators::non_empty};
/// use serde_json::json;
///
/// let rules = vec![
///     non_empty("name", "Name is required"),
///     non_empty("contact", "Contact is required"),
/// ];
/// let result = validate_payload(&rules, &json!({ "name": "", "contact": "9999999999" }));
///
/// assert!(!result.is_valid);
/// assert_eq!(result.error_for("name"), Some("Name is required"));
/// assert_eq!(result.error_map.len(), 1);
/// ```
pub fn validate_payload(rules: &[FieldRule], payload: &Value) -> ValidationResult {
    let mut is_valid = true;
    let mut error_map = ErrorMap::new();

    for rule in rules {
        if rule.evaluate(payload) {
            continue;
        }

        is_valid = false;
        error_map
            .entry(rule.path().to_string())
            .or_insert_with(|| rule.message().to_string());
    }

    if is_valid {
        tracing::trace!(rules = rules.len(), "payload passed validation");
    } else {
        tracing::debug!(
            rules = rules.len(),
            failed_paths = error_map.len(),
            "payload failed validation"
        );
    }

    ValidationResult {
        is_valid,
        error_map,
    }
}
