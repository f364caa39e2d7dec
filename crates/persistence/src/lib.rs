//! Coursework persistence layer.
//!
//! Stores students and courses and the many-to-many association between them.
//! Courses reference students without owning them: deleting a course removes
//! its enrollments and nothing else.
//!
//! # Architecture
//!
//! - [`types`] - Student and course records, ids, filters, update payloads
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits ([`core::StudentStorage`], [`core::CourseStorage`])
//! - [`backends`] - Backend implementations (SQLite)
//!
//! # Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use coursework_persistence::backends::sqlite::SqliteBackend;
//! use coursework_persistence::core::{CourseStorage, StudentStorage};
//! use coursework_persistence::types::{NewCourse, NewStudent};
//! use chrono::NaiveDate;
//!
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let oleg = backend
//!     .create_student(NewStudent::new("Oleg", NaiveDate::from_ymd_opt(1997, 1, 1).unwrap()))
//!     .await?;
//! let course = backend
//!     .create_course(NewCourse::new("first_one", vec![oleg.id]))
//!     .await?;
//! assert_eq!(course.students, vec![oleg.id]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

pub use error::{StorageError, StorageResult};
