//! HTTP request handlers.
//!
//! - [`courses`] - Course list, create, read, update, patch, delete
//! - [`students`] - Student list, create, read
//! - [`health`] - Health, liveness and readiness probes

pub mod courses;
pub mod health;
pub mod students;

pub use courses::{
    create_course_handler, delete_course_handler, list_courses_handler, patch_course_handler,
    read_course_handler, update_course_handler,
};
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use students::{create_student_handler, list_students_handler, read_student_handler};
