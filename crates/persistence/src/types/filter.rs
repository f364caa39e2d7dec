//! List filters.
//!
//! Filters match exactly and combine with AND. An empty filter matches every
//! record.

use super::{Course, CourseId, Student, StudentId};

/// Filter for listing courses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    /// Match this id only.
    pub id: Option<CourseId>,
    /// Match this exact name only.
    pub name: Option<String>,
}

impl CourseFilter {
    /// A filter that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one id.
    pub fn with_id(mut self, id: CourseId) -> Self {
        self.id = Some(id);
        self
    }

    /// Restricts to an exact name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns `true` if the course passes the filter.
    pub fn matches(&self, course: &Course) -> bool {
        self.id.is_none_or(|id| id == course.id)
            && self.name.as_deref().is_none_or(|name| name == course.name)
    }
}

/// Filter for listing students.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Match this id only.
    pub id: Option<StudentId>,
    /// Match this exact name only.
    pub name: Option<String>,
}

impl StudentFilter {
    /// A filter that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one id.
    pub fn with_id(mut self, id: StudentId) -> Self {
        self.id = Some(id);
        self
    }

    /// Restricts to an exact name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns `true` if the student passes the filter.
    pub fn matches(&self, student: &Student) -> bool {
        self.id.is_none_or(|id| id == student.id)
            && self.name.as_deref().is_none_or(|name| name == student.name)
    }
}
