//! # coursework-rest - Course enrollment REST API
//!
//! This crate exposes courses and students over HTTP and enforces the one
//! business rule of the service: a course may have at most a configured
//! number of students.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coursework_rest::{create_app_with_config, ServerConfig};
//! use coursework_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("coursework.db")?;
//!     backend.init_schema()?;
//!
//!     let config = ServerConfig::default();
//!     let app = create_app_with_config(backend, config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! Paths are relative to the API prefix (default `/api/v1`). Each is served
//! with and without the trailing slash.
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | list courses | GET | `/courses/?id=&name=` |
//! | create course | POST | `/courses/` |
//! | read course | GET | `/courses/{id}/` |
//! | replace course | PUT | `/courses/{id}/` |
//! | update course | PATCH | `/courses/{id}/` |
//! | delete course | DELETE | `/courses/{id}/` |
//! | list students | GET | `/students/?id=&name=` |
//! | create student | POST | `/students/` |
//! | read student | GET | `/students/{id}/` |
//!
//! `/health`, `/_liveness` and `/_readiness` are served without the prefix.
//!
//! Request bodies may be JSON, `application/x-www-form-urlencoded` or
//! `multipart/form-data`.
//!
//! ## Error Handling
//!
//! Errors are JSON objects `{"code", "detail", "field"?}`:
//!
//! | HTTP Status | Description |
//! |-------------|-------------|
//! | 400 | Malformed request, validation failure, enrollment limit exceeded |
//! | 404 | Course or student not found, or a non-integer id in the path |
//! | 408 | Request timed out |
//! | 413 | Body over `max_body_size` |
//! | 415 | Unsupported content type |
//! | 500 | Storage failure |
//!
//! ## Architecture
//!
//! - [`enrollment`] - The enrollment rule and its runtime-adjustable limit
//! - [`service`] - Course and student operations
//! - [`error`] - Error types and their HTTP rendering
//! - [`config`] - Server configuration
//! - [`state`] - Application state (service, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Axum extractors for bodies, filters and ids
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod enrollment;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routing;
pub mod service;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use enrollment::{EnrollmentPolicy, EnrollmentViolation, check_enrollment};
pub use error::{RestError, RestResult};
pub use service::CourseService;
pub use state::AppState;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use coursework_persistence::core::CourseStorage;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: CourseStorage + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use coursework_rest::{create_app_with_config, ServerConfig};
/// use coursework_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig {
///     max_students_per_course: 30,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: CourseStorage + Send + Sync + 'static,
{
    create_app_with_state(AppState::new(Arc::new(storage), config))
}

/// Creates the Axum application around existing state.
///
/// Callers that keep a clone of `state` can change the enrollment limit of
/// the running application through [`AppState::enrollment_policy`].
pub fn create_app_with_state<S>(state: AppState<S>) -> Router
where
    S: CourseStorage + Send + Sync + 'static,
{
    let config = state.config().clone();

    info!(
        backend = state.storage().backend_name(),
        prefix = %config.api_prefix,
        max_students_per_course = state.enrollment_policy().max_students(),
        "Creating REST API server"
    );

    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = router.layer(DefaultBodyLimit::max(config.max_body_size));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins == "*" {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG`, when set,
/// takes precedence over `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "coursework_rest={level},coursework_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
