//! Error types for the persistence layer.
//!
//! Errors are grouped by category: resource state, validation of the data
//! being written, and failures of the database backend itself.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::types::{CourseId, RecordKey, StudentId};

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns `true` if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Resource(ResourceError::NotFound { .. }))
    }
}

/// Errors related to resource state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested record was not found.
    #[error("{resource_type} not found: {id}")]
    NotFound { resource_type: String, id: String },
}

impl ResourceError {
    /// Builds a not-found error for a course id.
    pub fn course_not_found(id: impl ToString) -> Self {
        ResourceError::NotFound {
            resource_type: CourseId::RESOURCE_TYPE.to_string(),
            id: id.to_string(),
        }
    }

    /// Builds a not-found error for a student id.
    pub fn student_not_found(id: impl ToString) -> Self {
        ResourceError::NotFound {
            resource_type: StudentId::RESOURCE_TYPE.to_string(),
            id: id.to_string(),
        }
    }
}

/// Errors related to the content of a write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent or blank.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    /// A field value was rejected.
    #[error("invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    /// One or more referenced students do not exist.
    #[error("unknown student ids: {}", format_ids(.ids))]
    UnknownStudents { ids: Vec<StudentId> },
}

fn format_ids(ids: &[StudentId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Stored data could not be decoded.
    #[error("corrupt data in {backend_name}: {message}")]
    CorruptData {
        backend_name: String,
        message: String,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::ConnectionFailed {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
        })
    }
}
