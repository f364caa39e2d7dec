//! Course records and their student associations.
//!
//! A course references students without owning them. The association keeps
//! request order on read but behaves as a set: duplicate ids collapse onto
//! their first occurrence before anything is counted or stored.

use serde::{Deserialize, Serialize};

use super::{CourseId, StudentId, validate_name};
use crate::error::ValidationError;

/// A persisted course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Storage-assigned identifier.
    pub id: CourseId,
    /// Course name.
    pub name: String,
    /// Enrolled students, in the order they were given.
    pub students: Vec<StudentId>,
}

/// The fields needed to create a [`Course`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCourse {
    /// Course name.
    pub name: String,
    /// Enrolled students.
    pub students: Vec<StudentId>,
}

impl NewCourse {
    /// Creates a course payload, normalizing the student list.
    pub fn new(name: impl Into<String>, students: Vec<StudentId>) -> Self {
        Self {
            name: name.into(),
            students: normalize_students(students),
        }
    }

    /// Checks the payload before it is written.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

/// Changes applied to an existing course.
///
/// `None` leaves a field untouched; `Some(students)` replaces the whole
/// association, it never merges with the previous set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CourseChanges {
    /// New name, if changing.
    pub name: Option<String>,
    /// New student set, if changing.
    pub students: Option<Vec<StudentId>>,
}

impl CourseChanges {
    /// Changes only the student set.
    pub fn students(students: Vec<StudentId>) -> Self {
        Self {
            name: None,
            students: Some(normalize_students(students)),
        }
    }

    /// Sets the new name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new student set.
    pub fn with_students(mut self, students: Vec<StudentId>) -> Self {
        self.students = Some(normalize_students(students));
        self
    }

    /// Returns `true` if nothing would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.students.is_none()
    }

    /// Checks the changed fields before they are written.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }

    /// Applies the changes to a course in memory.
    pub fn apply_to(self, course: &mut Course) {
        if let Some(name) = self.name {
            course.name = name;
        }
        if let Some(students) = self.students {
            course.students = students;
        }
    }
}

/// Drops repeated student ids, keeping the first occurrence of each.
pub fn normalize_students(students: Vec<StudentId>) -> Vec<StudentId> {
    let mut seen = std::collections::HashSet::with_capacity(students.len());
    students.into_iter().filter(|id| seen.insert(*id)).collect()
}
