//! Field format checks and value coercions shared by validators and renderers

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use validator::ValidateEmail;

/// Field format validators for automatic validation
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    /// Ten-digit contact number
    Contact,
    /// Indian vehicle registration (`MH12AB1234`, `KA-01-HH-1234`, `22BH1234AA`)
    VehicleRegistration,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a field value against this format
    ///
    /// Only strings can match; contact numbers given as JSON numbers are
    /// checked on their decimal representation.
    pub fn validate(&self, value: &Value) -> bool {
        let owned;
        let string_value = match value {
            Value::String(s) => s.trim(),
            Value::Number(n) if matches!(self, FieldFormat::Contact) => {
                owned = n.to_string();
                owned.as_str()
            }
            _ => return false,
        };

        match self {
            FieldFormat::Email => string_value.validate_email(),
            FieldFormat::Contact => Self::is_valid_contact(string_value),
            FieldFormat::VehicleRegistration => Self::is_valid_registration(string_value),
            FieldFormat::Custom(regex) => regex.is_match(string_value),
        }
    }

    fn is_valid_contact(contact: &str) -> bool {
        static CONTACT_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = CONTACT_REGEX.get_or_init(|| Regex::new(r"^[0-9]{10}$").unwrap());
        regex.is_match(contact)
    }

    fn is_valid_registration(number: &str) -> bool {
        static STATE_SERIES_REGEX: OnceLock<Regex> = OnceLock::new();
        static BHARAT_SERIES_REGEX: OnceLock<Regex> = OnceLock::new();

        let state = STATE_SERIES_REGEX.get_or_init(|| {
            Regex::new(
                r"^(?i)[A-Z]{2}[ -]?[0-9]{1,2}(?:[ -]?[A-Z]{1,3}){0,2}[ -]?[0-9]{1,4}$",
            )
            .unwrap()
        });
        let bharat = BHARAT_SERIES_REGEX.get_or_init(|| {
            Regex::new(r"^(?i)[0-9]{2}[ -]?BH[ -]?[0-9]{4}[ -]?[A-Z]{1,2}$").unwrap()
        });

        state.is_match(number) || bharat.is_match(number)
    }
}

/// Coerce a value to a number
///
/// Form inputs frequently carry numbers as strings, so numeric strings are
/// accepted. Empty strings are not numbers.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
        _ => None,
    }
}

/// Coerce a value to a UTC instant
///
/// Accepts RFC 3339 strings, `datetime-local` style strings
/// (`2024-05-01T10:30`, with optional seconds, `T` or space separated, read as
/// UTC), plain dates (midnight UTC), and integers as epoch milliseconds.
pub fn as_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        Value::String(s) => parse_datetime(s.trim()),
        _ => None,
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}
