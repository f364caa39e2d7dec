//! Application state shared by all request handlers.

use std::sync::Arc;

use coursework_persistence::core::CourseStorage;

use crate::config::ServerConfig;
use crate::enrollment::EnrollmentPolicy;
use crate::service::CourseService;

/// Shared application state for the REST API.
///
/// # Example
///
/// ```rust,ignore
/// use coursework_rest::{AppState, ServerConfig};
/// use coursework_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// state.enrollment_policy().set_max_students(30);
/// ```
pub struct AppState<S> {
    /// Course and student operations.
    service: CourseService<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: CourseStorage> AppState<S> {
    /// Creates a new AppState.
    ///
    /// The enrollment limit starts at `config.max_students_per_course`.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        let policy = EnrollmentPolicy::new(config.max_students_per_course);
        Self {
            service: CourseService::new(storage, policy),
            config: Arc::new(config),
        }
    }

    /// Returns the course service.
    pub fn service(&self) -> &CourseService<S> {
        &self.service
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        self.service.storage()
    }

    /// Returns the live enrollment policy.
    pub fn enrollment_policy(&self) -> &EnrollmentPolicy {
        self.service.policy()
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
