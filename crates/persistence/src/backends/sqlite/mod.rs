//! SQLite backend implementation.
//!
//! Supports both in-memory databases (great for testing) and file-based
//! databases (for development and small deployments).
//!
//! # Example
//!
//! ```no_run
//! use coursework_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE students (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name TEXT NOT NULL,
//!     birth_date TEXT NOT NULL      -- YYYY-MM-DD
//! );
//!
//! CREATE TABLE courses (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name TEXT NOT NULL
//! );
//!
//! -- Many-to-many association, position keeps request order
//! CREATE TABLE course_students (
//!     course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
//!     student_id INTEGER NOT NULL REFERENCES students(id),
//!     position INTEGER NOT NULL,
//!     PRIMARY KEY (course_id, student_id)
//! );
//! ```

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
