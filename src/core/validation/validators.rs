//! Reusable rule constructors
//!
//! Each constructor returns a [`FieldRule`] for a path. Page rule-set builders
//! compose them, putting presence checks before comparison checks on the same
//! path since comparisons assume a value is there.

use super::rule::FieldRule;
use crate::core::field::{FieldFormat, as_datetime, as_number};
use crate::core::path::get_at_path;
use regex::Regex;
use serde_json::Value;

/// Rule: value is present
///
/// Fails on a missing value, `null`, a blank string, and an empty array.
/// Numbers and booleans are present whatever their value; use
/// [`number_greater_than_zero`] to refuse `0`.
pub fn non_empty(path: impl Into<String>, message: impl Into<String>) -> FieldRule {
    FieldRule::new(path, message, |value, _| value.is_some_and(is_present))
}

/// Rule: value is a number strictly greater than zero
///
/// Numeric strings are accepted. A missing value fails.
pub fn number_greater_than_zero(path: impl Into<String>, message: impl Into<String>) -> FieldRule {
    FieldRule::new(path, message, |value, _| {
        value.and_then(as_number).is_some_and(|n| n > 0.0)
    })
}

/// Rule: number at `path` is strictly greater than the number at `other_path`
///
/// Fails closed when either side is missing or not numeric. `label` names the
/// other field in the default message, e.g. "Must be greater than opening km".
pub fn number_greater_than_field(
    path: impl Into<String>,
    other_path: impl Into<String>,
    label: &str,
) -> FieldRule {
    let other_path = other_path.into();
    FieldRule::new(
        path,
        format!("Must be greater than {}", label),
        move |value, payload| {
            let current = value.and_then(as_number);
            let other = get_at_path(payload, &other_path).and_then(as_number);
            matches!((current, other), (Some(current), Some(other)) if current > other)
        },
    )
}

/// Rule: datetime at `path` is strictly after the datetime at `other_path`
///
/// Fails closed when either side is missing or unparseable.
pub fn date_time_greater_than_field(
    path: impl Into<String>,
    other_path: impl Into<String>,
    label: &str,
) -> FieldRule {
    let other_path = other_path.into();
    FieldRule::new(
        path,
        format!("Must be after {} date and time", label),
        move |value, payload| {
            let current = value.and_then(as_datetime);
            let other = get_at_path(payload, &other_path).and_then(as_datetime);
            matches!((current, other), (Some(current), Some(other)) if current > other)
        },
    )
}

/// Rule: value is a well-formed email address
pub fn valid_email(path: impl Into<String>, message: impl Into<String>) -> FieldRule {
    format_rule(path, message, FieldFormat::Email)
}

/// Rule: value is a ten-digit contact number
pub fn valid_contact(path: impl Into<String>, message: impl Into<String>) -> FieldRule {
    format_rule(path, message, FieldFormat::Contact)
}

/// Rule: value is a vehicle registration number
pub fn valid_vehicle_registration(
    path: impl Into<String>,
    message: impl Into<String>,
) -> FieldRule {
    format_rule(path, message, FieldFormat::VehicleRegistration)
}

/// Rule: value matches a custom pattern
pub fn matches_pattern(
    path: impl Into<String>,
    message: impl Into<String>,
    pattern: Regex,
) -> FieldRule {
    format_rule(path, message, FieldFormat::Custom(pattern))
}

/// Rule: value is one of the allowed values
pub fn one_of(
    path: impl Into<String>,
    message: impl Into<String>,
    allowed: Vec<Value>,
) -> FieldRule {
    FieldRule::new(path, message, move |value, _| {
        value.is_some_and(|v| allowed.contains(v))
    })
}

fn format_rule(
    path: impl Into<String>,
    message: impl Into<String>,
    format: FieldFormat,
) -> FieldRule {
    FieldRule::new(path, message, move |value, _| {
        value.is_some_and(|v| format.validate(v))
    })
}

/// Whether a value counts as filled in
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}
