//! Core types for the persistence layer.
//!
//! - [`Student`], [`NewStudent`] - student records
//! - [`Course`], [`NewCourse`], [`CourseChanges`] - course records and updates
//! - [`CourseFilter`], [`StudentFilter`] - exact-match list filters
//! - [`StudentId`], [`CourseId`] - typed identifiers
//!
//! # Example
//!
//! ```
//! use coursework_persistence::types::{CourseChanges, NewCourse, StudentId};
//!
//! let course = NewCourse::new("first_one", vec![StudentId::new(1), StudentId::new(1)]);
//! assert_eq!(course.students, vec![StudentId::new(1)]);
//!
//! let changes = CourseChanges::students(vec![StudentId::new(4)]);
//! assert!(changes.name.is_none());
//! ```

mod course;
mod filter;
mod ids;
mod student;

pub use course::{Course, CourseChanges, NewCourse, normalize_students};
pub use filter::{CourseFilter, StudentFilter};
pub use ids::{CourseId, RecordKey, StudentId};
pub use student::{NewStudent, Student};

use crate::error::ValidationError;

/// Longest accepted student or course name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Checks that a name is present and not too long.
pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingRequiredField {
            field: "name".to_string(),
        });
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::InvalidField {
            field: "name".to_string(),
            message: format!("must be at most {} characters", MAX_NAME_LENGTH),
        });
    }
    Ok(())
}
