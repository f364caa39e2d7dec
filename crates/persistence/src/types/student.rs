//! Student records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{StudentId, validate_name};
use crate::error::ValidationError;

/// A persisted student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Storage-assigned identifier.
    pub id: StudentId,
    /// Display name.
    pub name: String,
    /// Date of birth, serialized as `YYYY-MM-DD`.
    pub birth_date: NaiveDate,
}

/// The fields needed to create a [`Student`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    /// Display name.
    pub name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
}

impl NewStudent {
    /// Creates a new student payload.
    pub fn new(name: impl Into<String>, birth_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            birth_date,
        }
    }

    /// Checks the payload before it is written.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }

    /// Attaches an id, producing the stored form.
    pub fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            birth_date: self.birth_date,
        }
    }
}
