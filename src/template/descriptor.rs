//! Field descriptors: one renderable datum of a detail panel or list column

use crate::core::error::ConfigError;
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "field";

/// Render function receiving the whole record
pub type CustomRender = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// How a descriptor turns a record into a display value
#[derive(Clone)]
pub enum Render {
    /// Plain lookup of the descriptor's path
    Path,
    /// Caller-supplied function over the whole record
    Custom(CustomRender),
    /// Compiled `tera` template with the record bound as `record`
    Template(Arc<Tera>),
}

impl fmt::Debug for Render {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Render::Path => write!(f, "Path"),
            Render::Custom(_) => write!(f, "Custom"),
            Render::Template(_) => write!(f, "Template"),
        }
    }
}

/// One renderable datum
///
/// `path` is always present: it identifies the field and drives visibility
/// filtering even when a custom renderer produces the value.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    label: String,
    path: String,
    render: Render,
}

impl FieldDescriptor {
    /// Descriptor resolved by path lookup
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            render: Render::Path,
        }
    }

    /// Descriptor resolved by a render function over the whole record
    pub fn custom<F>(label: impl Into<String>, path: impl Into<String>, render: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            path: path.into(),
            render: Render::Custom(Arc::new(render)),
        }
    }

    /// Descriptor resolved by a `tera` template
    ///
    /// The template is compiled here so that schema mistakes surface when the
    /// schema is built, not while rendering.
    ///
    /// ```
    /// use fleetdesk::template::FieldDescriptor;
    ///
    /// let field = FieldDescriptor::template(
    ///     "Route",
    ///     "pickUpLocation",
    ///     "{{ record.pickUpLocation }} → {{ record.dropLocation }}",
    /// );
    /// assert!(field.is_ok());
    /// ```
    pub fn template(
        label: impl Into<String>,
        path: impl Into<String>,
        source: &str,
    ) -> Result<Self, ConfigError> {
        let label = label.into();
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, source)
            .map_err(|e| ConfigError::InvalidTemplate {
                label: label.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            label,
            path: path.into(),
            render: Render::Template(Arc::new(tera)),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn render(&self) -> &Render {
        &self.render
    }
}

/// Render a compiled template against `record`
///
/// Returns `None` when rendering fails, typically because the template reads
/// an attribute the record does not have.
pub(crate) fn render_template(tera: &Tera, label: &str, record: &Value) -> Option<String> {
    let context = match Context::from_value(json!({ "record": record })) {
        Ok(context) => context,
        Err(e) => {
            tracing::debug!(field = label, error = %e, "template context rejected record");
            return None;
        }
    };

    match tera.render(TEMPLATE_NAME, &context) {
        Ok(rendered) => Some(rendered),
        Err(e) => {
            tracing::debug!(field = label, error = %e, "template did not render");
            None
        }
    }
}
