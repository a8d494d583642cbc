//! Error handling module for Floral Tours
//!
//! This module defines the error types used throughout the gateway,
//! separating transport failures, CMS response failures and locally
//! detected validation failures, and maps them onto HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::{ValidationError, ValidationErrorKind, ValidationErrors};

/// Field reported when the request body itself cannot be read
pub const BODY_FIELD: &str = "body";

/// Result type alias for Floral Tours operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Floral Tours
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The CMS could not be reached (connection refused, DNS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The CMS answered with a non-success status
    #[error("CMS responded with status {status}: {}", message.as_deref().unwrap_or("no message"))]
    Response {
        status: u16,
        message: Option<String>,
    },

    /// Locally detected bad input, never sent to the CMS
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a response error from a status code and optional server message
    pub fn response(status: u16, message: Option<String>) -> Self {
        Error::Response { status, message }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Response { .. } => StatusCode::BAD_GATEWAY,
            Error::Transport(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Config(_) | Error::Serialization(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Check if the user may resubmit the same request as-is
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Response { .. })
    }

    /// Message suitable for showing to the person who filled in a form
    pub fn user_message(&self) -> String {
        match self {
            Error::Response {
                message: Some(message),
                ..
            } => message.clone(),
            Error::Transport(_) => {
                "The service is temporarily unreachable. Please try again.".to_string()
            },
            other => other.to_string(),
        }
    }
}

/// Implement IntoResponse for automatic error responses in Axum
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let fields = match &self {
            Error::Validation(errors) => Some(errors.field_messages()),
            _ => None,
        };

        let body = Json(json!({
            "error": {
                "message": self.user_message(),
                "type": error_type(&self),
                "status": status.as_u16(),
                "retryable": self.is_retryable(),
                "fields": fields,
            }
        }));

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = ?self, "Internal server error");
            },
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => {
                tracing::warn!(error = %self, "Upstream CMS error");
            },
            _ => {
                tracing::info!(error = %self, "Request error");
            },
        }

        (status, body).into_response()
    }
}

/// Get a string representation of the error type
fn error_type(error: &Error) -> &'static str {
    match error {
        Error::Config(_) => "configuration_error",
        Error::Transport(_) => "transport_error",
        Error::Response { .. } => "response_error",
        Error::Validation(_) => "validation_error",
        Error::Serialization(_) => "serialization_error",
        Error::Io(_) => "io_error",
        Error::NotFound(_) => "not_found",
        Error::Internal(_) => "internal_error",
    }
}

/// Convert from reqwest::Error to our Error type
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::response(status.as_u16(), None),
            None => Error::Transport(err.to_string()),
        }
    }
}

/// Malformed or mistyped request bodies are reported like any other bad input
impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::with_context(
            ValidationErrorKind::Custom(rejection.body_text()),
            BODY_FIELD,
            rejection.status().to_string(),
        )
        .into()
    }
}

/// Convert from envconfig::Error to our Error type
impl From<envconfig::Error> for Error {
    fn from(err: envconfig::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let validation: Error =
            ValidationError::new(ValidationErrorKind::RequiredField, "email").into();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::response(500, None).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            Error::transport("refused").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            Error::internal("test").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_retryable() {
        assert!(Error::transport("test").is_retryable());
        assert!(Error::response(503, None).is_retryable());
        let validation: Error =
            ValidationError::new(ValidationErrorKind::InvalidEmail, "email").into();
        assert!(!validation.is_retryable());
    }

    #[test]
    fn test_response_error_display() {
        let err = Error::response(409, Some("Date fully booked".to_string()));
        assert_eq!(
            err.to_string(),
            "CMS responded with status 409: Date fully booked"
        );
        assert_eq!(err.user_message(), "Date fully booked");

        let err = Error::response(500, None);
        assert_eq!(err.to_string(), "CMS responded with status 500: no message");
    }

    #[test]
    fn test_transport_message_names_no_endpoint() {
        let message = Error::transport("connection refused").user_message();
        assert_eq!(message, "The service is temporarily unreachable. Please try again.");
        assert!(!message.contains("booking"));
    }

    #[test]
    fn test_not_found_status() {
        let err = Error::NotFound("No route for /nowhere".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_validation_response_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new(
            ValidationErrorKind::RequiredField,
            "firstName",
        ));
        let response = Error::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["type"], "validation_error");
        assert!(json["error"]["fields"]["firstName"].is_string());
    }
}
