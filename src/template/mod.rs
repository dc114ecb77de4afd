//! Path-driven rendering of detail panels and list columns
//!
//! A page describes what to show with a static schema of [`PanelGroup`]s (or
//! a flat column list), each field naming a dotted path into the record. At
//! render time the schema is filtered against the record's discriminant
//! fields and every remaining field is resolved to a display string.

pub mod descriptor;
pub mod panel;
pub mod resolver;

pub use descriptor::{CustomRender, FieldDescriptor, Render};
pub use panel::{Condition, PanelGroup, PanelKind, VisibilityRule, field_visible};
pub use resolver::{
    PLACEHOLDER, ResolvedField, ResolvedPanel, display_value, filter_panels, resolve_field_value,
    resolve_panel, resolve_panels, resolve_row, resolve_table,
};
