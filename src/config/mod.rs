//! Declarative page schemas loaded from YAML
//!
//! A page schema carries the same pieces as a [`RecordKind`](crate::entities::RecordKind)
//! implementation, in data form: conditional rules, detail panels, list
//! columns, visibility rules and reference attributes. It lets a deployment
//! adjust a page without recompiling.
//!
//! ```yaml
//! pages:
//!   - name: vehicle
//!     rules:
//!       - path: vehicleNo
//!         check: non_empty
//!         message: Vehicle number is required
//!       - path: supplier
//!         check: non_empty
//!         when: { path: ownershipType, equals: supplier }
//!     panels:
//!       - title: Vehicle Details
//!         fields:
//!           - { label: Vehicle No, path: vehicleNo }
//! ```

use crate::core::error::ConfigError;
use crate::core::reference::ReferenceSpec;
use crate::core::validation::FieldRule;
use crate::core::validation::validators::*;
use crate::template::{Condition, FieldDescriptor, PanelGroup, VisibilityRule, field_visible};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// What a rule checks, with the arguments the check needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum CheckSpec {
    NonEmpty,
    GreaterThanZero,
    GreaterThanField { other: String, label: String },
    DateTimeAfterField { other: String, label: String },
    Email,
    Contact,
    VehicleRegistration,
    OneOf { values: Vec<Value> },
    Pattern { regex: String },
}

/// One declarative rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub path: String,

    /// Overrides the check's default message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The rule only applies to payloads matching this condition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<Condition>,

    #[serde(flatten)]
    pub check: CheckSpec,
}

impl RuleSpec {
    fn applies_to(&self, payload: &Value) -> bool {
        self.when
            .as_ref()
            .is_none_or(|condition| condition.matches(payload))
    }

    fn build(&self) -> Result<FieldRule, ConfigError> {
        let path = self.path.as_str();
        let rule = match &self.check {
            CheckSpec::NonEmpty => non_empty(path, "This field is required"),
            CheckSpec::GreaterThanZero => number_greater_than_zero(path, "Must be greater than 0"),
            CheckSpec::GreaterThanField { other, label } => {
                number_greater_than_field(path, other.as_str(), label)
            }
            CheckSpec::DateTimeAfterField { other, label } => {
                date_time_greater_than_field(path, other.as_str(), label)
            }
            CheckSpec::Email => valid_email(path, "Enter a valid email"),
            CheckSpec::Contact => valid_contact(path, "Enter a valid 10 digit contact number"),
            CheckSpec::VehicleRegistration => {
                valid_vehicle_registration(path, "Enter a valid vehicle number")
            }
            CheckSpec::OneOf { values } => one_of(path, "Select a valid option", values.clone()),
            CheckSpec::Pattern { regex } => {
                let pattern = Regex::new(regex).map_err(|e| ConfigError::InvalidPattern {
                    path: self.path.clone(),
                    pattern: regex.clone(),
                    message: e.to_string(),
                })?;
                matches_pattern(path, "Invalid format", pattern)
            }
        };

        Ok(match &self.message {
            Some(message) => rule.with_message(message.as_str()),
            None => rule,
        })
    }
}

/// A field of a panel or list, optionally rendered through a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub label: String,
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl FieldSpec {
    fn build(&self) -> Result<FieldDescriptor, ConfigError> {
        match &self.template {
            Some(source) => FieldDescriptor::template(&self.label, &self.path, source),
            None => Ok(FieldDescriptor::new(&self.label, &self.path)),
        }
    }
}

/// A panel of the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub title: String,
    pub fields: Vec<FieldSpec>,

    /// Render once per element of this array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<Condition>,
}

/// Everything one page needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSchema {
    pub name: String,

    #[serde(default)]
    pub rules: Vec<RuleSpec>,

    #[serde(default)]
    pub panels: Vec<PanelSpec>,

    #[serde(default)]
    pub columns: Vec<FieldSpec>,

    #[serde(default)]
    pub visibility: Vec<VisibilityRule>,

    #[serde(default)]
    pub references: Vec<ReferenceSpec>,
}

impl PageSchema {
    /// Build the rule list for `payload`
    ///
    /// Rules whose `when` condition fails for the payload are left out;
    /// the rest keep their declared order.
    pub fn rules_for(&self, payload: &Value) -> Result<Vec<FieldRule>, ConfigError> {
        self.rules
            .iter()
            .filter(|spec| spec.applies_to(payload))
            .map(RuleSpec::build)
            .collect()
    }

    /// Build the detail panels, compiling any templates
    pub fn panels(&self) -> Result<Vec<PanelGroup>, ConfigError> {
        self.panels
            .iter()
            .map(|spec| {
                let fields = spec
                    .fields
                    .iter()
                    .map(FieldSpec::build)
                    .collect::<Result<Vec<_>, _>>()?;

                let mut panel = PanelGroup::new(&spec.title, fields);
                if let Some(parent_path) = &spec.multiple {
                    panel = panel.multiple(parent_path);
                }
                if let Some(condition) = &spec.visible_when {
                    panel = panel.visible_when(condition.clone());
                }
                Ok(panel)
            })
            .collect()
    }

    /// Build the list columns, compiling any templates
    pub fn columns(&self) -> Result<Vec<FieldDescriptor>, ConfigError> {
        self.columns.iter().map(FieldSpec::build).collect()
    }

    /// Whether `field` is shown for `record` under this page's visibility rules
    pub fn field_visible(&self, field: &FieldDescriptor, record: &Value) -> bool {
        field_visible(&self.visibility, field, record)
    }
}

/// A set of page schemas
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub pages: Vec<PageSchema>,
}

impl SchemaConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: display.clone(),
            },
            _ => ConfigError::ParseError {
                file: Some(display.clone()),
                message: e.to_string(),
            },
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(display),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Merge several configurations
    ///
    /// A page defined again by a later configuration replaces the earlier
    /// definition in place; new pages are appended.
    pub fn merge(configs: Vec<SchemaConfig>) -> Self {
        let mut pages: Vec<PageSchema> = Vec::new();

        for page in configs.into_iter().flat_map(|config| config.pages) {
            match pages.iter_mut().find(|existing| existing.name == page.name) {
                Some(existing) => *existing = page,
                None => pages.push(page),
            }
        }

        Self { pages }
    }

    /// Look up a page by name
    pub fn page(&self, name: &str) -> Result<&PageSchema, ConfigError> {
        self.pages
            .iter()
            .find(|page| page.name == name)
            .ok_or_else(|| ConfigError::UnknownPage {
                page: name.to_string(),
            })
    }
}
