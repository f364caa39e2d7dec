//! REST API test harness.

use std::sync::Arc;

use axum_test::TestServer;
use coursework_persistence::backends::sqlite::SqliteBackend;
use coursework_rest::{AppState, ServerConfig, create_app_with_state};

/// A test server over a fresh in-memory database.
///
/// # Example
///
/// ```rust,ignore
/// let app = TestApp::new();
/// let students = app.fixtures().students(2).await;
/// let response = app.server.get(&app.url("/courses/")).await;
/// assert_eq!(response.status_code(), 200);
/// ```
pub struct TestApp {
    /// The test server instance.
    pub server: TestServer,

    /// The storage backend, for seeding and inspecting data.
    pub backend: Arc<SqliteBackend>,

    /// Application state shared with the server.
    pub state: AppState<SqliteBackend>,
}

impl TestApp {
    /// Creates a test app with [`ServerConfig::for_testing`].
    pub fn new() -> Self {
        Self::with_config(ServerConfig::for_testing())
    }

    /// Creates a test app with a specific enrollment limit.
    pub fn with_max_students(max: usize) -> Self {
        Self::with_config(ServerConfig {
            max_students_per_course: max,
            ..ServerConfig::for_testing()
        })
    }

    /// Creates a test app with the given configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
        backend.init_schema().expect("Failed to init schema");
        let backend = Arc::new(backend);

        let state = AppState::new(Arc::clone(&backend), config);
        let app = create_app_with_state(state.clone());
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            backend,
            state,
        }
    }

    /// Returns `path` under the configured API prefix.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.state.config().normalized_prefix(), path)
    }

    /// Returns fixtures that write straight to the backend.
    pub fn fixtures(&self) -> super::fixtures::Fixtures<'_> {
        super::fixtures::Fixtures::new(&self.backend)
    }
}
