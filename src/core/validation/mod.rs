//! Declarative payload validation
//!
//! A page builds a flat list of [`FieldRule`]s for the payload at hand
//! (conditionally, from its discriminant fields) and hands both to
//! [`validate_payload`], which returns an overall verdict and a path-keyed
//! error map. The engine itself has no conditional logic.

pub mod engine;
pub mod extractor;
pub mod filters;
pub mod form;
pub mod rule;
pub mod validators;

pub use engine::{ErrorMap, ValidationResult, validate_payload};
pub use extractor::Validated;
pub use filters::PayloadFilters;
pub use form::FormState;
pub use rule::{Check, FieldRule};
