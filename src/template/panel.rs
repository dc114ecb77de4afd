//! Panel/column groups and the discriminant conditions that gate them

use super::descriptor::FieldDescriptor;
use crate::core::path::get_at_path;
use crate::core::validation::validators::is_present;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A test on one discriminant field of a record
///
/// Every criterion that is set must hold. With no criterion set, the field
/// only has to be filled in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Condition {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Value>>,
}

impl Condition {
    /// `path` holds exactly `value`
    pub fn equals(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            equals: Some(value.into()),
            ..Self::default()
        }
    }

    /// `path` does not hold `value` (an absent field qualifies)
    pub fn not_equals(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            not_equals: Some(value.into()),
            ..Self::default()
        }
    }

    /// `path` holds one of `values`
    pub fn one_of(path: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            path: path.into(),
            one_of: Some(values),
            ..Self::default()
        }
    }

    /// `path` is filled in
    pub fn present(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &Value) -> bool {
        let value = get_at_path(record, &self.path);

        if self.equals.is_none() && self.not_equals.is_none() && self.one_of.is_none() {
            return value.is_some_and(is_present);
        }

        let equals = self.equals.as_ref().is_none_or(|expected| value == Some(expected));
        let not_equals = self
            .not_equals
            .as_ref()
            .is_none_or(|unexpected| value != Some(unexpected));
        let one_of = self
            .one_of
            .as_ref()
            .is_none_or(|allowed| value.is_some_and(|v| allowed.contains(v)));

        equals && not_equals && one_of
    }
}

/// Hide every field under `prefix` unless `when` holds for the record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityRule {
    pub prefix: String,
    pub when: Condition,
}

impl VisibilityRule {
    pub fn new(prefix: impl Into<String>, when: Condition) -> Self {
        Self {
            prefix: prefix.into(),
            when,
        }
    }

    /// Whether this rule lets `field` through for `record`
    pub fn allows(&self, field: &FieldDescriptor, record: &Value) -> bool {
        !field.path().starts_with(&self.prefix) || self.when.matches(record)
    }
}

/// Field predicate built from visibility rules: visible unless a rule hides it
pub fn field_visible(rules: &[VisibilityRule], field: &FieldDescriptor, record: &Value) -> bool {
    rules.iter().all(|rule| rule.allows(field, record))
}

/// Whether a group renders once or once per element of an array
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelKind {
    #[default]
    Single,
    /// One row per element of the array at `parent_path`; field paths are
    /// relative to the element
    Multiple { parent_path: String },
}

/// A named, ordered group of field descriptors
#[derive(Debug, Clone)]
pub struct PanelGroup {
    pub title: String,
    pub fields: Vec<FieldDescriptor>,
    pub kind: PanelKind,
    /// Panel-level applicability; a failing condition drops the whole panel
    pub visible_when: Option<Condition>,
}

impl PanelGroup {
    pub fn new(title: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            title: title.into(),
            fields,
            kind: PanelKind::Single,
            visible_when: None,
        }
    }

    /// Render once per element of the array at `parent_path`
    pub fn multiple(mut self, parent_path: impl Into<String>) -> Self {
        self.kind = PanelKind::Multiple {
            parent_path: parent_path.into(),
        };
        self
    }

    pub fn visible_when(mut self, condition: Condition) -> Self {
        self.visible_when = Some(condition);
        self
    }

    pub fn applies_to(&self, record: &Value) -> bool {
        self.visible_when
            .as_ref()
            .is_none_or(|condition| condition.matches(record))
    }
}
