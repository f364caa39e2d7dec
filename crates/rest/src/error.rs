//! Error types for the REST API.
//!
//! Every error is rendered as a JSON body of the form
//! `{"code": ..., "detail": ..., "field": ...}` where `field` is present only
//! for errors tied to one request field.
//!
//! # Error Mapping
//!
//! | Source | HTTP Status | Code |
//! |--------|-------------|------|
//! | NotFound | 404 | `not_found` |
//! | ValidationError, EnrollmentViolation | 400 | `invalid` |
//! | Malformed body or query | 400 | `bad_request` |
//! | Body over the size limit | 413 | `payload_too_large` |
//! | Unsupported content type | 415 | `unsupported_media_type` |
//! | BackendError | 500 | `internal_error` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coursework_persistence::error::{ResourceError, StorageError, ValidationError};
use serde::Serialize;
use std::fmt;
use tracing::error;

use crate::enrollment::EnrollmentViolation;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Record not found (HTTP 404).
    NotFound {
        /// The record type (e.g., "Course").
        resource_type: String,
        /// The requested id.
        id: String,
    },

    /// Malformed request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Well-formed request whose content was rejected (HTTP 400).
    Validation {
        /// The offending field, if the error is tied to one.
        field: Option<String>,
        /// Error message.
        message: String,
    },

    /// Request body exceeds the configured limit (HTTP 413).
    PayloadTooLarge {
        /// Error message.
        message: String,
    },

    /// Unsupported media type (HTTP 415).
    UnsupportedMediaType {
        /// The unsupported content type.
        content_type: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Builds a validation error tied to `field`.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        RestError::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Builds a validation error for a required field that was not supplied.
    pub fn required(field: impl Into<String>) -> Self {
        Self::field(field, "this field is required")
    }

    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } | RestError::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            RestError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            RestError::NotFound { .. } => "not_found",
            RestError::BadRequest { .. } => "bad_request",
            RestError::Validation { .. } => "invalid",
            RestError::PayloadTooLarge { .. } => "payload_too_large",
            RestError::UnsupportedMediaType { .. } => "unsupported_media_type",
            RestError::InternalError { .. } => "internal_error",
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { resource_type, id } => {
                write!(f, "{} {} not found", resource_type, id)
            }
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::Validation {
                field: Some(field),
                message,
            } => write!(f, "Invalid {}: {}", field, message),
            RestError::Validation {
                field: None,
                message,
            } => write!(f, "Invalid request: {}", message),
            RestError::PayloadTooLarge { message } => write!(f, "Payload too large: {}", message),
            RestError::UnsupportedMediaType { content_type } => {
                write!(f, "Unsupported media type: {}", content_type)
            }
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            RestError::NotFound { resource_type, id } => {
                format!("{} {} not found", resource_type, id)
            }
            RestError::BadRequest { message }
            | RestError::Validation { message, .. }
            | RestError::PayloadTooLarge { message }
            | RestError::InternalError { message } => message.clone(),
            RestError::UnsupportedMediaType { content_type } => {
                format!("Content type '{}' is not supported", content_type)
            }
        };
        let field = match &self {
            RestError::Validation { field, .. } => field.as_deref(),
            _ => None,
        };

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            code: self.code(),
            detail,
            field,
        };
        (status, Json(body)).into_response()
    }
}

// Conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => RestError::InternalError {
                message: e.to_string(),
            },
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { resource_type, id } => {
                RestError::NotFound { resource_type, id }
            }
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::MissingRequiredField { field } => RestError::required(field.clone()),
            ValidationError::InvalidField { field, message } => {
                RestError::field(field.clone(), message.clone())
            }
            ValidationError::UnknownStudents { .. } => RestError::field("students", err.to_string()),
        }
    }
}

impl From<EnrollmentViolation> for RestError {
    fn from(err: EnrollmentViolation) -> Self {
        RestError::field("students", err.to_string())
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::BadRequest {
            message: format!("Invalid JSON: {}", err),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
