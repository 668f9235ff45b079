// Error body shapes shared by every endpoint.
//
// Two shapes, per the API contract: a generic single-message body for store
// failures and not-found, and a field-granular list for validation failures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic failure body: `{"error": "..."}`.
/// The message is always a generic phrase; store diagnostics stay server-side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// One field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Path of the offending field, with indices for nested elements
    /// (e.g. `events[0].properties[2].type`).
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation failure body: `{"errors": [{"field", "message"}, ...]}`.
/// The list is non-empty and ordered by declaration order of the checks.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

impl ValidationErrorResponse {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse::new("Failed to create event");
        let json = serde_json::to_string(&error).expect("Failed to serialize");
        assert_eq!(json, r#"{"error":"Failed to create event"}"#);
    }

    #[test]
    fn test_validation_error_response_serialization() {
        let body = ValidationErrorResponse::new(vec![
            FieldError::new("name", "name must be a non-empty string"),
            FieldError::new("events[0].type", "type must be a non-empty string"),
        ]);
        let parsed: serde_json::Value = serde_json::to_value(&body).expect("Failed to serialize");
        assert_eq!(parsed["errors"][0]["field"], "name");
        assert_eq!(parsed["errors"][1]["field"], "events[0].type");
        assert_eq!(
            parsed["errors"][1]["message"],
            "type must be a non-empty string"
        );
    }
}
