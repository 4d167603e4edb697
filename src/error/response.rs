//! Error handler for converting AppError to HTTP responses.
//!
//! The request-handling layer returns `AppError` directly; this module
//! turns it into a status code plus a JSON body so the classification made
//! by the services reaches the client unchanged.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::AppError;

/// Standard error response format.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        match error {
            AppError::NotFound {
                entity,
                field,
                value,
            } => ErrorResponse::new("NOT_FOUND", &error.message()).with_details(json!({
                "entity": entity,
                "field": field,
                "value": value,
            })),
            AppError::Validation { field, reason } => {
                ErrorResponse::new("VALIDATION_ERROR", reason).with_details(json!({
                    "field": field,
                }))
            }
            AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
            AppError::Database { operation, .. } => ErrorResponse::new(
                "DATABASE_ERROR",
                &format!("Database operation failed: {}", operation),
            ),
            AppError::Configuration { key, .. } => ErrorResponse::new(
                "CONFIGURATION_ERROR",
                &format!("Configuration error: {}", key),
            ),
            // Source chains stay in the logs
            AppError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status_code().is_server_error() {
            tracing::error!(error = ?self, "Request failed with server error");
        }
        (self.status_code(), Json(ErrorResponse::from(&self))).into_response()
    }
}
