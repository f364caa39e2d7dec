//! List filter extractor.
//!
//! Extracts the optional `id` and `name` filters from the query string.
//! Unknown parameters are ignored.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use coursework_persistence::types::{CourseFilter, StudentFilter};
use serde::Deserialize;

use crate::error::RestError;

/// Axum extractor for list filters.
///
/// # Example
///
/// ```rust,ignore
/// use coursework_rest::extractors::ListFilter;
///
/// async fn list_handler(filter: ListFilter) {
///     let courses = storage.list_courses(&filter.course_filter()).await?;
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Exact id to match.
    pub id: Option<i64>,
    /// Exact name to match.
    pub name: Option<String>,
}

/// Raw query parameters, before id parsing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    id: Option<String>,
    name: Option<String>,
}

impl ListFilter {
    /// Returns the filter as a course filter.
    pub fn course_filter(&self) -> CourseFilter {
        CourseFilter {
            id: self.id.map(Into::into),
            name: self.name.clone(),
        }
    }

    /// Returns the filter as a student filter.
    pub fn student_filter(&self) -> StudentFilter {
        StudentFilter {
            id: self.id.map(Into::into),
            name: self.name.clone(),
        }
    }

    fn from_query(query: ListQuery) -> Result<Self, RestError> {
        let id = match query.id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| RestError::BadRequest {
                message: format!("Query parameter 'id' must be an integer, got '{}'", raw),
            })?),
        };
        Ok(Self {
            id,
            name: query.name,
        })
    }
}

impl<S> FromRequestParts<S> for ListFilter
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ListQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;
        Self::from_query(query)
    }
}
