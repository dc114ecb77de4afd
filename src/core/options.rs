//! Select-option lists sourced from asynchronously fetched records

use crate::core::path::get_at_path;
use crate::template::resolver::display_value;
use serde::Serialize;
use serde_json::Value;

/// One entry of a dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// State of an option list whose source is still being fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum OptionsState<T> {
    Loading,
    Error(String),
    Ready(Vec<T>),
}

impl<T> OptionsState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, OptionsState::Ready(_))
    }

    /// Options to offer; empty while loading or after an error
    pub fn options(&self) -> &[T] {
        match self {
            OptionsState::Ready(options) => options,
            _ => &[],
        }
    }

    pub fn map<U, F>(self, f: F) -> OptionsState<U>
    where
        F: FnOnce(Vec<T>) -> Vec<U>,
    {
        match self {
            OptionsState::Loading => OptionsState::Loading,
            OptionsState::Error(message) => OptionsState::Error(message),
            OptionsState::Ready(options) => OptionsState::Ready(f(options)),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<Vec<T>, E>> for OptionsState<T> {
    fn from(result: Result<Vec<T>, E>) -> Self {
        match result {
            Ok(options) => OptionsState::Ready(options),
            Err(e) => OptionsState::Error(e.to_string()),
        }
    }
}

/// Build select options from records
///
/// Records without a usable value are skipped; a missing label falls back to
/// the value.
pub fn select_options(records: &[Value], label_path: &str, value_path: &str) -> Vec<SelectOption> {
    records
        .iter()
        .filter_map(|record| {
            let value = get_at_path(record, value_path).and_then(display_value)?;
            let label = get_at_path(record, label_path)
                .and_then(display_value)
                .unwrap_or_else(|| value.clone());
            Some(SelectOption { label, value })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_options_from_records() {
        let records = vec![
            json!({ "_id": "c1", "name": "Ramesh" }),
            json!({ "_id": "c2" }),
            json!({ "name": "No id" }),
        ];
        let options = select_options(&records, "name", "_id");
        assert_eq!(
            options,
            vec![SelectOption::new("Ramesh", "c1"), SelectOption::new("c2", "c2")]
        );
    }

    #[test]
    fn test_options_state_from_result() {
        let ok: Result<Vec<u8>, String> = Ok(vec![1, 2]);
        let state: OptionsState<u8> = ok.into();
        assert!(state.is_ready());
        assert_eq!(state.options(), &[1, 2]);

        let err: Result<Vec<u8>, String> = Err("timeout".to_string());
        let state: OptionsState<u8> = err.into();
        assert_eq!(state, OptionsState::Error("timeout".to_string()));
        assert!(state.options().is_empty());
    }

    #[test]
    fn test_loading_offers_nothing() {
        let state: OptionsState<SelectOption> = OptionsState::Loading;
        assert!(!state.is_ready());
        assert!(state.options().is_empty());
    }

    #[test]
    fn test_map_keeps_state() {
        let state = OptionsState::Ready(vec![json!({ "_id": "v1", "vehicleNo": "MH12AB1234" })])
            .map(|records| select_options(&records, "vehicleNo", "_id"));
        assert_eq!(
            state.options(),
            &[SelectOption::new("MH12AB1234", "v1")]
        );

        let loading: OptionsState<SelectOption> =
            OptionsState::<Value>::Loading.map(|records| select_options(&records, "name", "_id"));
        assert_eq!(loading, OptionsState::Loading);
    }

    #[test]
    fn test_serializes_tagged() {
        let state: OptionsState<SelectOption> = OptionsState::Error("offline".to_string());
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({ "state": "error", "data": "offline" })
        );
    }
}
