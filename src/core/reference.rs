//! Reference fields: bare identifiers vs. populated objects
//!
//! A reference attribute (`customer`, `staff`, `vehicleDetails.vehicle`, ...)
//! arrives either as the referenced record's id or as the embedded record
//! itself, depending on whether the API expanded it. Pages normalize every
//! reference once after fetch so that descriptor paths such as
//! `customer.name` resolve without branching on shape, and collapse them back
//! to ids before handing a payload to the mutation side.

use crate::core::path::{get_at_path, set_at_path};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Key holding a populated record's identifier
pub const ID_KEY: &str = "_id";

/// Attribute used for display when none is configured
pub const DEFAULT_DISPLAY_KEY: &str = "name";

/// A reference attribute in one of its two wire shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    /// Unpopulated: the referenced record's id
    Identifier(String),
    /// Populated: the referenced record embedded by the API
    Populated(Map<String, Value>),
}

impl Reference {
    /// Interpret a raw value as a reference, if it has one of the two shapes
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(id) => Some(Reference::Identifier(id.clone())),
            Value::Object(map) => Some(Reference::Populated(map.clone())),
            _ => None,
        }
    }

    /// The referenced record's id, when known
    pub fn id(&self) -> Option<&str> {
        match self {
            Reference::Identifier(id) => Some(id),
            Reference::Populated(map) => map.get(ID_KEY).and_then(Value::as_str),
        }
    }

    /// Object shape expected by descriptor paths
    ///
    /// A bare id degrades to `{ "_id": id, <display_key>: id }` so the id is
    /// at least shown where the display attribute would be.
    pub fn into_populated(self, display_key: &str) -> Value {
        match self {
            Reference::Identifier(id) => json!({ ID_KEY: id.clone(), display_key: id }),
            Reference::Populated(map) => Value::Object(map),
        }
    }

    /// Submit-time shape: the bare id
    ///
    /// A populated object without an id is kept as-is.
    pub fn into_identifier(self) -> Value {
        match self {
            Reference::Identifier(id) => Value::String(id),
            Reference::Populated(map) => match map.get(ID_KEY) {
                Some(Value::String(id)) => Value::String(id.clone()),
                _ => Value::Object(map),
            },
        }
    }
}

/// Where a reference lives in a record and which attribute displays it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSpec {
    /// Dotted path of the reference attribute
    pub path: String,

    /// Attribute of the referenced record shown in detail/list views
    #[serde(default = "default_display_key")]
    pub display_key: String,
}

fn default_display_key() -> String {
    DEFAULT_DISPLAY_KEY.to_string()
}

impl ReferenceSpec {
    /// Reference displayed through its `name` attribute
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_key: default_display_key(),
        }
    }

    /// Reference displayed through a custom attribute
    pub fn with_display_key(path: impl Into<String>, display_key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_key: display_key.into(),
        }
    }
}

/// Normalize every listed reference into its populated object shape
///
/// Absent references are left absent; array-valued references are normalized
/// element by element.
pub fn normalize_references(record: &Value, specs: &[ReferenceSpec]) -> Value {
    rewrite_references(record, specs, |reference, spec| {
        reference.into_populated(&spec.display_key)
    })
}

/// Collapse every listed reference back to its bare id
pub fn depopulate_references(record: &Value, specs: &[ReferenceSpec]) -> Value {
    rewrite_references(record, specs, |reference, _| reference.into_identifier())
}

fn rewrite_references<F>(record: &Value, specs: &[ReferenceSpec], rewrite: F) -> Value
where
    F: Fn(Reference, &ReferenceSpec) -> Value,
{
    specs.iter().fold(record.clone(), |current, spec| {
        let rewritten = match get_at_path(&current, &spec.path) {
            Some(Value::Array(items)) => Some(Value::Array(
                items
                    .iter()
                    .map(|item| match Reference::from_value(item) {
                        Some(reference) => rewrite(reference, spec),
                        None => item.clone(),
                    })
                    .collect(),
            )),
            Some(value) => Reference::from_value(value).map(|reference| rewrite(reference, spec)),
            None => None,
        };

        match rewritten {
            Some(value) => set_at_path(&current, &spec.path, value),
            None => current,
        }
    })
}
