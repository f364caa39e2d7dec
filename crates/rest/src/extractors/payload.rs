//! Typed course and student payloads.
//!
//! Payloads are read from [`RequestFields`], so they accept JSON and form
//! bodies alike. Ids may be JSON numbers or numeric strings.

use axum::extract::{FromRequest, Request};
use chrono::NaiveDate;
use coursework_persistence::types::{CourseChanges, NewCourse, NewStudent, StudentId};
use serde_json::Value;

use super::body::RequestFields;
use crate::error::{RestError, RestResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Course fields supplied by a client. Absent fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePayload {
    /// Course name.
    pub name: Option<String>,
    /// Student ids, in request order.
    pub students: Option<Vec<StudentId>>,
}

impl CoursePayload {
    /// Reads the payload from decoded body fields.
    pub fn from_fields(fields: &RequestFields) -> RestResult<Self> {
        Ok(Self {
            name: string_field(fields, "name")?,
            students: student_ids(fields.get("students"))?,
        })
    }

    /// Converts into a new course. `name` is required; `students` defaults to
    /// none.
    pub fn into_new_course(self) -> RestResult<NewCourse> {
        let name = self.name.ok_or_else(|| RestError::required("name"))?;
        Ok(NewCourse::new(name, self.students.unwrap_or_default()))
    }

    /// Converts into a full replacement. Both fields are required.
    pub fn into_replacement(self) -> RestResult<NewCourse> {
        let name = self.name.ok_or_else(|| RestError::required("name"))?;
        let students = self.students.ok_or_else(|| RestError::required("students"))?;
        Ok(NewCourse::new(name, students))
    }

    /// Converts into a partial update.
    pub fn into_changes(self) -> CourseChanges {
        let mut changes = CourseChanges::default();
        if let Some(name) = self.name {
            changes = changes.with_name(name);
        }
        if let Some(students) = self.students {
            changes = changes.with_students(students);
        }
        changes
    }
}

impl<S> FromRequest<S> for CoursePayload
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let fields = RequestFields::from_request(req, state).await?;
        Self::from_fields(&fields)
    }
}

/// Student fields supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPayload {
    /// Display name.
    pub name: Option<String>,
    /// Birth date as sent, `YYYY-MM-DD`.
    pub birth_date: Option<String>,
}

impl StudentPayload {
    /// Reads the payload from decoded body fields.
    pub fn from_fields(fields: &RequestFields) -> RestResult<Self> {
        Ok(Self {
            name: string_field(fields, "name")?,
            birth_date: string_field(fields, "birth_date")?,
        })
    }

    /// Converts into a new student. Both fields are required.
    pub fn into_new_student(self) -> RestResult<NewStudent> {
        let name = self.name.ok_or_else(|| RestError::required("name"))?;
        let raw = self
            .birth_date
            .ok_or_else(|| RestError::required("birth_date"))?;
        let birth_date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
            RestError::field(
                "birth_date",
                format!("'{}' is not a date in YYYY-MM-DD format", raw),
            )
        })?;
        Ok(NewStudent::new(name, birth_date))
    }
}

impl<S> FromRequest<S> for StudentPayload
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let fields = RequestFields::from_request(req, state).await?;
        Self::from_fields(&fields)
    }
}

fn string_field(fields: &RequestFields, name: &str) -> RestResult<Option<String>> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(RestError::field(name, "expected a string")),
    }
}

fn student_ids(value: Option<&Value>) -> RestResult<Option<Vec<StudentId>>> {
    let values = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(values)) => values.as_slice(),
        Some(single) => std::slice::from_ref(single),
    };

    let mut ids = Vec::with_capacity(values.len());
    for value in values {
        match value {
            // An empty form value stands for "no students"
            Value::String(s) if s.trim().is_empty() => {}
            Value::String(s) => ids.push(
                s.parse()
                    .map_err(|_| RestError::field("students", format!("invalid student id '{}'", s)))?,
            ),
            Value::Number(n) => {
                let id = n.as_i64().ok_or_else(|| {
                    RestError::field("students", format!("invalid student id '{}'", n))
                })?;
                ids.push(StudentId::new(id));
            }
            other => {
                return Err(RestError::field(
                    "students",
                    format!("invalid student id '{}'", other),
                ));
            }
        }
    }
    Ok(Some(ids))
}
