//! Resolution of descriptors and panels against records
//!
//! Nothing in here fails: a value that cannot be found renders as
//! [`PLACEHOLDER`], because detail and list views routinely show partial
//! records.

use super::descriptor::{FieldDescriptor, Render, render_template};
use super::panel::{PanelGroup, PanelKind};
use crate::core::path::get_at_path;
use crate::core::reference::{DEFAULT_DISPLAY_KEY, ID_KEY};
use serde::Serialize;
use serde_json::Value;

/// Display value of anything that could not be resolved
pub const PLACEHOLDER: &str = "-";

/// One resolved datum
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    pub label: String,
    pub path: String,
    pub value: String,
}

/// A panel after resolution: one row for single panels, one per array
/// element for multiple panels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPanel {
    pub title: String,
    pub multiple: bool,
    pub rows: Vec<Vec<ResolvedField>>,
}

/// Display text for a raw value, `None` when there is nothing to show
///
/// Strings show as-is (blank strings count as nothing), booleans as
/// `Yes`/`No`, arrays as a comma-separated list, and objects through their
/// `name` or, failing that, their `_id`.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("Yes".to_string()),
        Value::Bool(false) => Some("No".to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(display_value).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(map) => map
            .get(DEFAULT_DISPLAY_KEY)
            .or_else(|| map.get(ID_KEY))
            .and_then(display_value),
    }
}

/// Display value for one descriptor
///
/// A custom renderer or template takes precedence over path lookup. Empty
/// output from any strategy degrades to the placeholder.
pub fn resolve_field_value(record: &Value, field: &FieldDescriptor) -> String {
    let resolved = match field.render() {
        Render::Custom(render) => Some(render(record)).filter(|s| !s.trim().is_empty()),
        Render::Template(tera) => {
            render_template(tera, field.label(), record).filter(|s| !s.trim().is_empty())
        }
        Render::Path => get_at_path(record, field.path()).and_then(display_value),
    };

    resolved.unwrap_or_else(|| {
        tracing::trace!(path = field.path(), "no value to display");
        PLACEHOLDER.to_string()
    })
}

/// Keep the fields `predicate` accepts and the panels that still apply
///
/// A panel is dropped when its own condition fails or when no field
/// survives. Panel order and field order are preserved.
pub fn filter_panels<F>(panels: &[PanelGroup], record: &Value, predicate: F) -> Vec<PanelGroup>
where
    F: Fn(&FieldDescriptor, &Value) -> bool,
{
    panels
        .iter()
        .filter_map(|panel| {
            if !panel.applies_to(record) {
                return None;
            }

            let fields: Vec<FieldDescriptor> = panel
                .fields
                .iter()
                .filter(|field| predicate(field, record))
                .cloned()
                .collect();

            if fields.is_empty() {
                return None;
            }

            Some(PanelGroup {
                fields,
                ..panel.clone()
            })
        })
        .collect()
}

/// Resolve every field of one row against `record`
pub fn resolve_row(record: &Value, fields: &[FieldDescriptor]) -> Vec<ResolvedField> {
    fields
        .iter()
        .map(|field| ResolvedField {
            label: field.label().to_string(),
            path: field.path().to_string(),
            value: resolve_field_value(record, field),
        })
        .collect()
}

/// Resolve a panel against `record`
///
/// Multiple panels resolve their fields against each element of the array at
/// their parent path; a missing or non-array parent yields no rows.
pub fn resolve_panel(panel: &PanelGroup, record: &Value) -> ResolvedPanel {
    let (multiple, rows) = match &panel.kind {
        PanelKind::Single => (false, vec![resolve_row(record, &panel.fields)]),
        PanelKind::Multiple { parent_path } => {
            let rows = match get_at_path(record, parent_path) {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|item| resolve_row(item, &panel.fields))
                    .collect(),
                _ => Vec::new(),
            };
            (true, rows)
        }
    };

    ResolvedPanel {
        title: panel.title.clone(),
        multiple,
        rows,
    }
}

/// Resolve every panel against `record`
pub fn resolve_panels(panels: &[PanelGroup], record: &Value) -> Vec<ResolvedPanel> {
    panels
        .iter()
        .map(|panel| resolve_panel(panel, record))
        .collect()
}

/// Resolve list-grid columns for each record
pub fn resolve_table(records: &[Value], columns: &[FieldDescriptor]) -> Vec<Vec<ResolvedField>> {
    records
        .iter()
        .map(|record| resolve_row(record, columns))
        .collect()
}
