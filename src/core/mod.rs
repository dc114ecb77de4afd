//! Core building blocks: path addressing, references, validation and the
//! record collaborator contract

pub mod error;
pub mod field;
pub mod options;
pub mod path;
pub mod reference;
pub mod service;
pub mod submission;
pub mod validation;

pub use error::{FleetError, RecordError, ValidationError};
pub use field::FieldFormat;
pub use options::{OptionsState, SelectOption};
pub use path::{get_at_path, remove_at_path, set_at_path};
pub use reference::{Reference, ReferenceSpec};
pub use service::RecordService;
