//! Course handlers.
//!
//! `[prefix]/courses/` and `[prefix]/courses/{id}/`

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use coursework_persistence::core::CourseStorage;
use coursework_persistence::types::CourseId;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{CoursePayload, ListFilter, RecordId};
use crate::state::AppState;

/// Lists courses in creation order.
///
/// # HTTP Request
///
/// `GET [prefix]/courses/?id=..&name=..`
///
/// Both filters are optional and match exactly.
pub async fn list_courses_handler<S>(
    State(state): State<AppState<S>>,
    filter: ListFilter,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(id = ?filter.id, name = ?filter.name, "Processing course list request");

    let courses = state.service().list(&filter.course_filter()).await?;
    Ok((StatusCode::OK, Json(courses)).into_response())
}

/// Creates a course.
///
/// # HTTP Request
///
/// `POST [prefix]/courses/`
///
/// # Response
///
/// - `201 Created` - Course created, `Location` points at it
/// - `400 Bad Request` - Missing name, unknown student, or too many students
/// - `415 Unsupported Media Type` - Body is neither JSON nor a form
///
/// # Example
///
/// ```http
/// POST /api/v1/courses/ HTTP/1.1
/// Content-Type: application/json
///
/// {"name": "first_one", "students": [1, 2]}
/// ```
pub async fn create_course_handler<S>(
    State(state): State<AppState<S>>,
    payload: CoursePayload,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(name = ?payload.name, students = ?payload.students, "Processing course create request");

    let course = state.service().create(payload.into_new_course()?).await?;
    let location = state.config().course_url(course.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(course),
    )
        .into_response())
}

/// Returns one course.
///
/// `GET [prefix]/courses/{id}/`
pub async fn read_course_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId<CourseId>,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(course_id = %id, "Processing course read request");

    let course = state.service().retrieve(id).await?;
    Ok((StatusCode::OK, Json(course)).into_response())
}

/// Partially updates a course.
///
/// `PATCH [prefix]/courses/{id}/`
///
/// Only the fields present in the body change. A `students` list replaces
/// the previous one.
pub async fn patch_course_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId<CourseId>,
    payload: CoursePayload,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(course_id = %id, students = ?payload.students, "Processing course patch request");

    let course = state.service().update(id, payload.into_changes()).await?;
    Ok((StatusCode::OK, Json(course)).into_response())
}

/// Replaces a course.
///
/// `PUT [prefix]/courses/{id}/`
///
/// Both `name` and `students` are required.
pub async fn update_course_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId<CourseId>,
    payload: CoursePayload,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(course_id = %id, "Processing course update request");

    let course = state.service().replace(id, payload.into_replacement()?).await?;
    Ok((StatusCode::OK, Json(course)).into_response())
}

/// Deletes a course. Its students are kept.
///
/// # Response
///
/// - `204 No Content` - Course deleted
/// - `404 Not Found` - No such course
pub async fn delete_course_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId<CourseId>,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(course_id = %id, "Processing course delete request");

    state.service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
