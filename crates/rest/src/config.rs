//! Server configuration.
//!
//! Configuration comes from command line arguments, environment variables, or
//! is built programmatically.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `COURSEWORK_SERVER_PORT` | 8080 | Server port |
//! | `COURSEWORK_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `COURSEWORK_LOG_LEVEL` | info | Log level |
//! | `COURSEWORK_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `COURSEWORK_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `COURSEWORK_ENABLE_CORS` | true | Enable CORS |
//! | `COURSEWORK_CORS_ORIGINS` | * | Allowed origins |
//! | `COURSEWORK_API_PREFIX` | /api/v1 | Path prefix for the API routes |
//! | `COURSEWORK_BASE_URL` | http://localhost:8080 | Base URL used in `Location` headers |
//! | `COURSEWORK_DATABASE_URL` | coursework.db | SQLite database path, or `:memory:` |
//! | `MAX_STUDENTS_PER_COURSE` | 20 | Enrollment limit per course |
//!
//! # Example
//!
//! ```rust
//! use coursework_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     max_students_per_course: 5,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::Parser;

use crate::enrollment::DEFAULT_MAX_STUDENTS_PER_COURSE;

/// Server configuration for the Coursework API.
#[derive(Debug, Clone, Parser)]
#[command(name = "coursework")]
#[command(about = "Course and student enrollment REST API")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "COURSEWORK_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "COURSEWORK_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "COURSEWORK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "COURSEWORK_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "COURSEWORK_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "COURSEWORK_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "COURSEWORK_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Path prefix the API routes are mounted under.
    #[arg(long, env = "COURSEWORK_API_PREFIX", default_value = "/api/v1")]
    pub api_prefix: String,

    /// Base URL for the server (used in Location headers).
    #[arg(
        long,
        env = "COURSEWORK_BASE_URL",
        default_value = "http://localhost:8080"
    )]
    pub base_url: String,

    /// SQLite database path, or `:memory:`.
    #[arg(long, env = "COURSEWORK_DATABASE_URL", default_value = "coursework.db")]
    pub database_url: String,

    /// Maximum number of students a course may have.
    #[arg(long, env = "MAX_STUDENTS_PER_COURSE", default_value = "20")]
    pub max_students_per_course: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            api_prefix: "/api/v1".to_string(),
            base_url: "http://localhost:8080".to_string(),
            database_url: "coursework.db".to_string(),
            max_students_per_course: DEFAULT_MAX_STUDENTS_PER_COURSE,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the API prefix without a trailing slash. Empty means the API is
    /// mounted at the root.
    pub fn normalized_prefix(&self) -> &str {
        self.api_prefix.trim_end_matches('/')
    }

    /// Returns the absolute URL of a course.
    pub fn course_url(&self, id: impl std::fmt::Display) -> String {
        format!(
            "{}{}/courses/{}/",
            self.base_url.trim_end_matches('/'),
            self.normalized_prefix(),
            id
        )
    }

    /// Returns the absolute URL of a student.
    pub fn student_url(&self, id: impl std::fmt::Display) -> String {
        format!(
            "{}{}/students/{}/",
            self.base_url.trim_end_matches('/'),
            self.normalized_prefix(),
            id
        )
    }

    /// Returns `true` if the database lives in memory.
    pub fn is_memory_database(&self) -> bool {
        self.database_url == ":memory:"
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            errors.push(format!(
                "API prefix must start with '/': {}",
                self.api_prefix
            ));
        }

        if url::Url::parse(&self.base_url).is_err() {
            errors.push(format!("Base URL is not a valid URL: {}", self.base_url));
        }

        if self.database_url.trim().is_empty() {
            errors.push("Database URL cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses an ephemeral port and an in-memory database.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            max_body_size: 1024 * 1024,
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            api_prefix: "/api/v1".to_string(),
            base_url: "http://localhost".to_string(),
            database_url: ":memory:".to_string(),
            max_students_per_course: DEFAULT_MAX_STUDENTS_PER_COURSE,
        }
    }
}
