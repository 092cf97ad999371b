use thiserror::Error;
use std::collections::HashMap;
use serde::{Serialize, Deserialize};

// Import Axum types for HTTP response conversion
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{header::ALLOW, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Structured validation errors with field-level error mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationErrors {
    Single { field: String, message: String },
    Multiple { fields: HashMap<String, String> },
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationErrors::Single { field, message } => write!(f, "{}: {}", field, message),
            ValidationErrors::Multiple { fields } => {
                let mut pairs: Vec<_> = fields.iter().collect();
                pairs.sort();
                let rendered: Vec<String> = pairs
                    .into_iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect();
                write!(f, "{}", rendered.join("; "))
            }
        }
    }
}

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the sqlx library.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A migration failed to apply at startup.
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A validation error with field-level details (missing or malformed input).
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A not found error (resource does not exist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A conflict error (resource already exists).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The route exists but does not accept this method.
    #[error("Method {method} not allowed")]
    MethodNotAllowed {
        method: String,
        allow: &'static str,
    },

    /// An internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a single-field validation failure.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Error::Validation(ValidationErrors::Single {
            field: field.to_string(),
            message: message.into(),
        })
    }

    /// The status code this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Error::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Migrate(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::invalid_field("body", rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::invalid_field("query", rejection.body_text())
    }
}

/// Convert custom Error to HTTP response
///
/// This implementation maps each error variant to an appropriate HTTP status code
/// and returns a JSON response with an error message and error code.
/// Store failures are logged in full and reported to the client generically.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            Error::Validation(errors) => {
                match errors {
                    ValidationErrors::Single { field, message } => {
                        serde_json::json!({
                            "error": "Validation failed",
                            "code": "VALIDATION_ERROR",
                            "fields": {
                                field: message
                            }
                        })
                    }
                    ValidationErrors::Multiple { fields } => {
                        serde_json::json!({
                            "error": "Validation failed",
                            "code": "VALIDATION_ERROR",
                            "fields": fields
                        })
                    }
                }
            }
            Error::NotFound(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "NOT_FOUND"
                })
            }
            Error::Conflict(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "CONFLICT"
                })
            }
            Error::MethodNotAllowed { method, .. } => {
                serde_json::json!({
                    "error": format!("Method {} Not Allowed", method),
                    "code": "METHOD_NOT_ALLOWED"
                })
            }
            Error::Sqlx(e) => {
                tracing::error!(error = %e, "Database operation failed");
                serde_json::json!({
                    "error": "Database error",
                    "code": "INTERNAL_ERROR"
                })
            }
            Error::Migrate(e) => {
                tracing::error!(error = %e, "Database migration failed");
                serde_json::json!({
                    "error": "Database error",
                    "code": "INTERNAL_ERROR"
                })
            }
            Error::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                serde_json::json!({
                    "error": "Internal server error",
                    "code": "INTERNAL_ERROR"
                })
            }
            Error::Config(_) => {
                serde_json::json!({
                    "error": "Configuration error",
                    "code": "CONFIG_ERROR"
                })
            }
        };

        let mut response = (status, Json(body)).into_response();

        if let Error::MethodNotAllowed { allow, .. } = self {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(allow));
        }

        response
    }
}
