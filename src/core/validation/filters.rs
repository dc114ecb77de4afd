//! Reusable payload filters
//!
//! Filters normalize values at given paths before validation (trimmed names,
//! upper-cased registration numbers, lower-cased emails). They never mutate
//! the payload they are given; [`PayloadFilters::apply`] returns a new one.

use crate::core::path::{get_at_path, set_at_path};
use serde_json::{Value, json};
use std::sync::Arc;

/// A value transformation applied at one path
pub type Filter = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Filter: trim whitespace from string
pub fn trim() -> Filter {
    Arc::new(|value: Value| match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other,
    })
}

/// Filter: convert string to uppercase
pub fn uppercase() -> Filter {
    Arc::new(|value: Value| match value {
        Value::String(s) => Value::String(s.to_uppercase()),
        other => other,
    })
}

/// Filter: convert string to lowercase
pub fn lowercase() -> Filter {
    Arc::new(|value: Value| match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        other => other,
    })
}

/// Filter: round number to specified decimal places
pub fn round_decimals(decimals: u32) -> Filter {
    Arc::new(move |value: Value| {
        if let Some(num) = value.as_f64() {
            let factor = 10_f64.powi(decimals as i32);
            let rounded = (num * factor).round() / factor;
            json!(rounded)
        } else {
            value
        }
    })
}

/// Ordered list of (path, filter) pairs for one record kind
#[derive(Clone, Default)]
pub struct PayloadFilters {
    entries: Vec<(String, Filter)>,
}

impl PayloadFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter for `path`; filters on the same path run in insertion order
    pub fn add(mut self, path: impl Into<String>, filter: Filter) -> Self {
        self.entries.push((path.into(), filter));
        self
    }

    /// Return a copy of `payload` with every filter applied
    ///
    /// Paths absent from the payload are skipped; they are not created.
    pub fn apply(&self, payload: &Value) -> Value {
        self.entries
            .iter()
            .fold(payload.clone(), |current, (path, filter)| {
                match get_at_path(&current, path).cloned() {
                    Some(value) => {
                        let filtered = filter(value);
                        set_at_path(&current, path, filtered)
                    }
                    None => current,
                }
            })
    }
}

impl std::fmt::Debug for PayloadFilters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(path, _)| path))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === trim() ===

    #[test]
    fn test_trim_removes_whitespace() {
        assert_eq!(trim()(json!("  hello  ")), json!("hello"));
    }

    #[test]
    fn test_trim_non_string_passthrough() {
        assert_eq!(trim()(json!(42)), json!(42));
        assert_eq!(trim()(json!(null)), json!(null));
    }

    // === uppercase() / lowercase() ===

    #[test]
    fn test_uppercase_converts_string() {
        assert_eq!(uppercase()(json!("mh12ab1234")), json!("MH12AB1234"));
        assert_eq!(uppercase()(json!(42)), json!(42));
    }

    #[test]
    fn test_lowercase_converts_string() {
        assert_eq!(lowercase()(json!("Hello@WORLD.com")), json!("hello@world.com"));
        assert_eq!(lowercase()(json!(true)), json!(true));
    }

    // === round_decimals() ===

    #[test]
    fn test_round_decimals_two_places() {
        assert_eq!(round_decimals(2)(json!(3.14159)), json!(3.14));
    }

    #[test]
    fn test_round_decimals_non_number_passthrough() {
        assert_eq!(round_decimals(2)(json!("hello")), json!("hello"));
    }

    // === PayloadFilters ===

    #[test]
    fn test_apply_at_nested_paths() {
        let filters = PayloadFilters::new()
            .add("vehicleDetails.newVehicleDetails.vehicleNo", trim())
            .add("vehicleDetails.newVehicleDetails.vehicleNo", uppercase())
            .add("customerDetails.email", lowercase());

        let payload = json!({
            "vehicleDetails": { "newVehicleDetails": { "vehicleNo": " mh12ab1234 " } },
            "customerDetails": { "email": "Ops@Fleet.IN" }
        });

        let filtered = filters.apply(&payload);
        assert_eq!(
            filtered,
            json!({
                "vehicleDetails": { "newVehicleDetails": { "vehicleNo": "MH12AB1234" } },
                "customerDetails": { "email": "ops@fleet.in" }
            })
        );
        assert_eq!(
            payload["vehicleDetails"]["newVehicleDetails"]["vehicleNo"],
            " mh12ab1234 "
        );
    }

    #[test]
    fn test_apply_skips_absent_paths() {
        let filters = PayloadFilters::new().add("name", trim());
        assert_eq!(filters.apply(&json!({ "other": 1 })), json!({ "other": 1 }));
    }
}
