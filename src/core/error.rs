//! Typed error handling for fleetdesk
//!
//! Validation failures and resolution misses are ordinary outcomes, not
//! errors: a failed rule lands in an [`ErrorMap`](crate::core::validation::ErrorMap)
//! and a missing value renders as a placeholder. The types here cover the
//! boundaries around that core: rejected submissions, schema configuration,
//! and the record collaborators.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: a payload was refused at submit time
//! - [`ConfigError`]: a page schema could not be loaded or compiled
//! - [`RecordError`]: a record or record kind could not be found
//! - [`FleetError::Service`]: a data or mutation collaborator failed

use crate::core::validation::ErrorMap;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Aggregate banner shown above a form whose submission was refused
pub const SUBMISSION_BANNER: &str =
    "There is an error with submission, please correct the highlighted fields.";

/// The main error type for fleetdesk
#[derive(Debug)]
pub enum FleetError {
    /// A payload was refused by validation
    Validation(ValidationError),

    /// Schema configuration errors
    Config(ConfigError),

    /// Record lookup errors
    Record(RecordError),

    /// A data or mutation collaborator failed
    Service(String),
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::Validation(e) => write!(f, "{}", e),
            FleetError::Config(e) => write!(f, "{}", e),
            FleetError::Record(e) => write!(f, "{}", e),
            FleetError::Service(msg) => write!(f, "Service error: {}", msg),
        }
    }
}

impl std::error::Error for FleetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FleetError::Validation(e) => Some(e),
            FleetError::Config(e) => Some(e),
            FleetError::Record(e) => Some(e),
            FleetError::Service(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl FleetError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            FleetError::Validation(e) => e.status_code(),
            FleetError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FleetError::Record(e) => e.status_code(),
            FleetError::Service(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FleetError::Validation(e) => e.error_code(),
            FleetError::Config(_) => "CONFIG_ERROR",
            FleetError::Record(e) => e.error_code(),
            FleetError::Service(_) => "SERVICE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// The field error map, when this is a refused submission
    pub fn error_map(&self) -> Option<&ErrorMap> {
        match self {
            FleetError::Validation(ValidationError::Rejected { error_map }) => Some(error_map),
            _ => None,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            FleetError::Validation(ValidationError::Rejected { error_map }) => {
                Some(serde_json::json!({
                    "banner": SUBMISSION_BANNER,
                    "errors": error_map,
                }))
            }
            FleetError::Record(RecordError::NotFound { kind, id }) => Some(serde_json::json!({
                "kind": kind,
                "id": id,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for FleetError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A payload refused at submit time
#[derive(Debug)]
pub enum ValidationError {
    /// One or more field rules failed
    Rejected { error_map: ErrorMap },

    /// The payload is not a JSON object (or not JSON at all)
    InvalidPayload { message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Rejected { error_map } => {
                let msgs: Vec<String> = error_map
                    .iter()
                    .map(|(path, message)| format!("{}: {}", path, message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidPayload { message } => {
                write!(f, "Invalid payload: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ValidationError::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::Rejected { .. } => "VALIDATION_ERROR",
            ValidationError::InvalidPayload { .. } => "INVALID_PAYLOAD",
        }
    }
}

impl From<ValidationError> for FleetError {
    fn from(err: ValidationError) -> Self {
        FleetError::Validation(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors raised while loading or compiling page schemas
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse schema config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Schema config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Unknown page schema '{page}'")]
    UnknownPage { page: String },

    #[error("Invalid pattern '{pattern}' for rule on '{path}': {message}")]
    InvalidPattern {
        path: String,
        pattern: String,
        message: String,
    },

    #[error("Invalid template for field '{label}': {message}")]
    InvalidTemplate { label: String, message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_deref()
        .map(|f| format!(" '{}'", f))
        .unwrap_or_default()
}

impl From<ConfigError> for FleetError {
    fn from(err: ConfigError) -> Self {
        FleetError::Config(err)
    }
}

// =============================================================================
// Record Errors
// =============================================================================

/// Errors related to record lookups
#[derive(Debug)]
pub enum RecordError {
    /// Record was not found
    NotFound { kind: String, id: String },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::NotFound { kind, id } => {
                write!(f, "{} with id '{}' not found", kind, id)
            }
        }
    }
}

impl std::error::Error for RecordError {}

impl RecordError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RecordError::NotFound { .. } => "RECORD_NOT_FOUND",
        }
    }
}

impl From<RecordError> for FleetError {
    fn from(err: RecordError) -> Self {
        FleetError::Record(err)
    }
}

impl From<anyhow::Error> for FleetError {
    fn from(err: anyhow::Error) -> Self {
        FleetError::Service(err.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected() -> FleetError {
        let mut error_map = ErrorMap::new();
        error_map.insert("name".to_string(), "Name is required".to_string());
        error_map.insert("contact".to_string(), "Invalid contact".to_string());
        FleetError::Validation(ValidationError::Rejected { error_map })
    }

    #[test]
    fn test_rejected_display_lists_paths() {
        let display = rejected().to_string();
        assert!(display.contains("name: Name is required"));
        assert!(display.contains("contact"));
    }

    #[test]
    fn test_rejected_status_and_code() {
        let err = rejected();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.error_map().map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_rejected_response_carries_banner_and_errors() {
        let response = rejected().to_response();
        let details = response.details.expect("details should be present");
        assert_eq!(details["banner"], SUBMISSION_BANNER);
        assert_eq!(details["errors"]["name"], "Name is required");
    }

    #[test]
    fn test_invalid_payload_is_bad_request_without_details() {
        let err: FleetError = ValidationError::InvalidPayload {
            message: "expected a JSON object".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_PAYLOAD");
        assert!(err.error_map().is_none());
        assert!(err.to_response().details.is_none());
    }

    #[test]
    fn test_record_error_conversion() {
        let err: FleetError = RecordError::NotFound {
            kind: "vehicle".to_string(),
            id: "v1".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
        assert!(err.to_string().contains("vehicle with id 'v1' not found"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ParseError {
            file: Some("pages.yaml".to_string()),
            message: "bad indent".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse schema config 'pages.yaml': bad indent"
        );

        let err = ConfigError::ParseError {
            file: None,
            message: "bad indent".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse schema config: bad indent");
    }

    #[test]
    fn test_service_error_from_anyhow() {
        let err: FleetError = anyhow::anyhow!("connection reset").into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(err.error_map().is_none());
    }
}
