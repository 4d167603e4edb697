use axum::http::StatusCode;
use thiserror::Error;

/// Application-wide error type shared by every service and repository.
///
/// Each variant maps to exactly one HTTP status code, so callers can tell
/// a rejected input from a missing record or a storage failure without
/// inspecting the message text.
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced entity does not exist
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// A single input field failed validation
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Business rule violation with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Document store operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(
        entity: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        AppError::NotFound {
            entity: entity.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn database(operation: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AppError::Database {
            operation: operation.into(),
            source: source.into(),
        }
    }

    /// HTTP status code for this error.
    ///
    /// - NotFound → 404
    /// - Validation, BadRequest → 400
    /// - Database, Configuration, Internal → 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Database { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound { entity, .. } => format!("{} not found.", capitalize(entity)),
            AppError::Validation { reason, .. } => reason.clone(),
            AppError::BadRequest { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
