//! # fleetdesk
//!
//! Shared core of a fleet and transport-booking back office: declarative
//! validation of create/edit payloads and path-driven rendering of detail
//! and list views.
//!
//! ## Features
//!
//! - **Dotted-path addressing**: read and immutably write nested record values
//! - **Declarative validation**: pages build rule lists from the payload and get
//!   back a verdict plus a path-keyed error map
//! - **Schema-driven views**: panels and columns of field descriptors, filtered
//!   by discriminant fields and resolved to display strings
//! - **Reference normalization**: bare ids and populated objects render alike
//! - **Configuration-based**: page schemas can also be loaded from YAML
//!
//! ## Quick Start
//!
//! ```rust
//! use fleetdesk::prelude::*;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "vehicleNo": "MH12AB1234",
//!     "category": "cat-1",
//!     "seatingCapacity": 0,
//!     "ownershipType": "own"
//! });
//!
//! let result = validate_payload(&Vehicle::rules(&payload), &payload);
//! assert!(!result.is_valid);
//! assert_eq!(
//!     result.error_for("seatingCapacity"),
//!     Some("Seating capacity must be greater than 0")
//! );
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod logging;
pub mod storage;
pub mod template;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Paths & references ===
    pub use crate::core::path::{get_at_path, remove_at_path, set_at_path};
    pub use crate::core::reference::{
        Reference, ReferenceSpec, depopulate_references, normalize_references,
    };

    // === Validation ===
    pub use crate::core::validation::validators::{
        date_time_greater_than_field, matches_pattern, non_empty, number_greater_than_field,
        number_greater_than_zero, one_of, valid_contact, valid_email, valid_vehicle_registration,
    };
    pub use crate::core::validation::{
        ErrorMap, FieldRule, FormState, PayloadFilters, Validated, ValidationResult,
        validate_payload,
    };

    // === Views ===
    pub use crate::template::{
        Condition, FieldDescriptor, PLACEHOLDER, PanelGroup, PanelKind, ResolvedField,
        ResolvedPanel, VisibilityRule, filter_panels, resolve_field_value, resolve_panels,
        resolve_table,
    };

    // === Options ===
    pub use crate::core::options::{OptionsState, SelectOption, select_options};

    // === Record kinds ===
    pub use crate::entities::{
        AdvancePayment, Customer, MonthlyFixedRequest, Payment, RecordKind, Request, Staff,
        Supplier, Vehicle, visibility_predicate,
    };

    // === Pipelines & services ===
    pub use crate::core::service::RecordService;
    pub use crate::core::submission::{
        DetailView, ListView, check_payload, load_detail, load_list, submit_create,
        submit_update,
    };
    pub use crate::storage::InMemoryRecordService;

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, ErrorResponse, FleetError, RecordError, SUBMISSION_BANNER, ValidationError,
    };

    // === Config ===
    pub use crate::config::{CheckSpec, FieldSpec, PageSchema, PanelSpec, RuleSpec, SchemaConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
