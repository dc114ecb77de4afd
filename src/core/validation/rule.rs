//! Field rules: a dotted path, a predicate and the message shown on failure

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Predicate evaluated by a [`FieldRule`]
///
/// Receives the value found at the rule's path (`None` when absent) and the
/// whole payload, so cross-field rules can read sibling paths.
pub type Check = Arc<dyn Fn(Option<&Value>, &Value) -> bool + Send + Sync>;

/// One unit of validation
///
/// Rules are stateless: the outcome depends only on the payload they are
/// given.
#[derive(Clone)]
pub struct FieldRule {
    path: String,
    check: Check,
    message: String,
}

impl FieldRule {
    /// Build a rule from an arbitrary predicate
    ///
    /// # Examples
    ///
    /// ```
    /// use fleetdesk::core::validation::FieldRule;
    /// use serde_json::json;
    ///
    /// let rule = FieldRule::new("seats", "At most 50 seats", |value, _| {
    ///     value.and_then(|v| v.as_u64()).is_some_and(|seats| seats <= 50)
    /// });
    ///
    /// assert!(rule.evaluate(&json!({ "seats": 12 })));
    /// assert!(!rule.evaluate(&json!({ "seats": 80 })));
    /// ```
    pub fn new<F>(path: impl Into<String>, message: impl Into<String>, check: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> bool + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            check: Arc::new(check),
            message: message.into(),
        }
    }

    /// Replace the message surfaced on failure
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Run the predicate against `payload`
    pub fn evaluate(&self, payload: &Value) -> bool {
        let value = crate::core::path::get_at_path(payload, &self.path);
        (self.check)(value, payload)
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("path", &self.path)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_receives_whole_payload() {
        let rule = FieldRule::new("returnTrip", "Return needs a drop point", |value, payload| {
            value != Some(&json!(true)) || payload.get("dropLocation").is_some()
        });

        assert!(rule.evaluate(&json!({ "returnTrip": false })));
        assert!(!rule.evaluate(&json!({ "returnTrip": true })));
        assert!(rule.evaluate(&json!({ "returnTrip": true, "dropLocation": "Pune" })));
    }

    #[test]
    fn test_missing_value_is_none() {
        let rule = FieldRule::new("a.b", "missing", |value, _| value.is_none());
        assert!(rule.evaluate(&json!({})));
        assert!(!rule.evaluate(&json!({ "a": { "b": null } })));
    }

    #[test]
    fn test_with_message_overrides() {
        let rule = FieldRule::new("name", "first", |_, _| true).with_message("second");
        assert_eq!(rule.message(), "second");
        assert_eq!(rule.path(), "name");
    }

    #[test]
    fn test_debug_omits_predicate() {
        let rule = FieldRule::new("name", "Name is required", |_, _| true);
        let debug = format!("{:?}", rule);
        assert!(debug.contains("name"));
        assert!(debug.contains("Name is required"));
    }
}
