//! Course and student operations.
//!
//! [`CourseService`] sits between the HTTP handlers and the storage backend.
//! It validates names and applies the enrollment rule before anything is
//! written, so a rejected request never reaches storage.

use std::sync::Arc;

use coursework_persistence::core::CourseStorage;
use coursework_persistence::error::ResourceError;
use coursework_persistence::types::{
    Course, CourseChanges, CourseFilter, CourseId, NewCourse, NewStudent, Student, StudentFilter,
    StudentId,
};
use tracing::{debug, info, warn};

use crate::enrollment::EnrollmentPolicy;
use crate::error::RestResult;

/// Orchestrates course and student operations over a storage backend.
pub struct CourseService<S> {
    storage: Arc<S>,
    policy: EnrollmentPolicy,
}

impl<S> Clone for CourseService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            policy: self.policy.clone(),
        }
    }
}

impl<S: CourseStorage> CourseService<S> {
    /// Creates a service over `storage` enforcing `policy`.
    pub fn new(storage: Arc<S>, policy: EnrollmentPolicy) -> Self {
        Self { storage, policy }
    }

    /// Returns the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the enrollment policy.
    pub fn policy(&self) -> &EnrollmentPolicy {
        &self.policy
    }

    /// Creates a course.
    pub async fn create(&self, course: NewCourse) -> RestResult<Course> {
        course.validate()?;
        self.check_enrollment(&course.students)?;

        let created = self.storage.create_course(course).await?;
        info!(
            course_id = %created.id,
            students = created.students.len(),
            "Created course"
        );
        Ok(created)
    }

    /// Returns a course by id.
    pub async fn retrieve(&self, id: CourseId) -> RestResult<Course> {
        self.storage
            .read_course(id)
            .await?
            .ok_or_else(|| ResourceError::course_not_found(id).into())
    }

    /// Lists courses matching `filter`, in creation order.
    pub async fn list(&self, filter: &CourseFilter) -> RestResult<Vec<Course>> {
        let courses = self.storage.list_courses(filter).await?;
        debug!(count = courses.len(), ?filter, "Listed courses");
        Ok(courses)
    }

    /// Applies a partial update.
    ///
    /// A new student list replaces the previous one entirely.
    pub async fn update(&self, id: CourseId, changes: CourseChanges) -> RestResult<Course> {
        if changes.is_empty() {
            return self.retrieve(id).await;
        }

        changes.validate()?;
        if let Some(students) = &changes.students {
            self.check_enrollment(students)?;
        }

        let updated = self.storage.update_course(id, changes).await?;
        info!(
            course_id = %updated.id,
            students = updated.students.len(),
            "Updated course"
        );
        Ok(updated)
    }

    /// Replaces every field of a course.
    pub async fn replace(&self, id: CourseId, course: NewCourse) -> RestResult<Course> {
        let changes = CourseChanges::students(course.students).with_name(course.name);
        self.update(id, changes).await
    }

    /// Deletes a course. Its students are left in place.
    pub async fn delete(&self, id: CourseId) -> RestResult<()> {
        self.storage.delete_course(id).await?;
        info!(course_id = %id, "Deleted course");
        Ok(())
    }

    /// Creates a student.
    pub async fn create_student(&self, student: NewStudent) -> RestResult<Student> {
        student.validate()?;
        let created = self.storage.create_student(student).await?;
        info!(student_id = %created.id, "Created student");
        Ok(created)
    }

    /// Returns a student by id.
    pub async fn retrieve_student(&self, id: StudentId) -> RestResult<Student> {
        self.storage
            .read_student(id)
            .await?
            .ok_or_else(|| ResourceError::student_not_found(id).into())
    }

    /// Lists students matching `filter`.
    pub async fn list_students(&self, filter: &StudentFilter) -> RestResult<Vec<Student>> {
        Ok(self.storage.list_students(filter).await?)
    }

    fn check_enrollment(&self, students: &[StudentId]) -> RestResult<()> {
        self.policy.check(students).map_err(|violation| {
            warn!(
                count = violation.count,
                max = violation.max,
                "Rejected enrollment over the limit"
            );
            violation.into()
        })
    }
}
