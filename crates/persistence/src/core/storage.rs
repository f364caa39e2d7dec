//! Core storage traits.
//!
//! [`StudentStorage`] covers student records; [`CourseStorage`] extends it with
//! courses, since a course write has to check the students it references.
//!
//! # Atomicity
//!
//! Every mutating call either fully succeeds or leaves the store unchanged.
//! Backends check student references inside the same transaction as the write.
//!
//! # Example
//!
//! ```ignore
//! use coursework_persistence::core::CourseStorage;
//! use coursework_persistence::types::{CourseChanges, NewCourse, NewStudent};
//!
//! async fn example<S: CourseStorage>(storage: &S) -> StorageResult<()> {
//!     let date = chrono::NaiveDate::from_ymd_opt(1997, 1, 1).unwrap();
//!     let oleg = storage.create_student(NewStudent::new("Oleg", date)).await?;
//!
//!     let course = storage
//!         .create_course(NewCourse::new("first_one", vec![oleg.id]))
//!         .await?;
//!
//!     // Replace the students entirely
//!     let course = storage
//!         .update_course(course.id, CourseChanges::students(vec![]))
//!         .await?;
//!     assert!(course.students.is_empty());
//!
//!     // Students survive course deletion
//!     storage.delete_course(course.id).await?;
//!     assert!(storage.read_student(oleg.id).await?.is_some());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{
    Course, CourseChanges, CourseFilter, CourseId, NewCourse, NewStudent, Student, StudentFilter,
    StudentId,
};

/// Storage for student records.
#[async_trait]
pub trait StudentStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Checks that the backend is reachable and its schema is in place.
    async fn health_check(&self) -> StorageResult<()>;

    /// Creates a new student and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation` - If the name is blank or too long
    async fn create_student(&self, student: NewStudent) -> StorageResult<Student>;

    /// Reads a student by id.
    async fn read_student(&self, id: StudentId) -> StorageResult<Option<Student>>;

    /// Lists students matching the filter, in creation order.
    async fn list_students(&self, filter: &StudentFilter) -> StorageResult<Vec<Student>>;

    /// Returns the number of stored students.
    async fn count_students(&self) -> StorageResult<u64>;
}

/// Storage for course records and their student associations.
#[async_trait]
pub trait CourseStorage: StudentStorage {
    /// Creates a new course.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation(UnknownStudents)` - If a referenced student does not exist
    /// * `StorageError::Validation` - If the name is blank or too long
    async fn create_course(&self, course: NewCourse) -> StorageResult<Course>;

    /// Reads a course by id, with its students in stored order.
    async fn read_course(&self, id: CourseId) -> StorageResult<Option<Course>>;

    /// Lists courses matching the filter, in creation order.
    async fn list_courses(&self, filter: &CourseFilter) -> StorageResult<Vec<Course>>;

    /// Applies changes to an existing course.
    ///
    /// A new student set replaces the old one entirely.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If the course does not exist
    /// * `StorageError::Validation(UnknownStudents)` - If a referenced student does not exist
    async fn update_course(&self, id: CourseId, changes: CourseChanges) -> StorageResult<Course>;

    /// Deletes a course. Its students are left in place.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If the course does not exist
    async fn delete_course(&self, id: CourseId) -> StorageResult<()>;

    /// Returns the number of stored courses.
    async fn count_courses(&self) -> StorageResult<u64>;
}
