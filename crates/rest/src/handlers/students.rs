//! Student handlers.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use coursework_persistence::core::CourseStorage;
use coursework_persistence::types::StudentId;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{ListFilter, RecordId, StudentPayload};
use crate::state::AppState;

/// `GET [prefix]/students/?id=..&name=..`
pub async fn list_students_handler<S>(
    State(state): State<AppState<S>>,
    filter: ListFilter,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(id = ?filter.id, name = ?filter.name, "Processing student list request");

    let students = state
        .service()
        .list_students(&filter.student_filter())
        .await?;
    Ok((StatusCode::OK, Json(students)).into_response())
}

/// `POST [prefix]/students/` with `name` and `birth_date`.
pub async fn create_student_handler<S>(
    State(state): State<AppState<S>>,
    payload: StudentPayload,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    let student = state
        .service()
        .create_student(payload.into_new_student()?)
        .await?;
    let location = state.config().student_url(student.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(student),
    )
        .into_response())
}

/// `GET [prefix]/students/{id}/`
pub async fn read_student_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId<StudentId>,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(student_id = %id, "Processing student read request");

    let student = state.service().retrieve_student(id).await?;
    Ok((StatusCode::OK, Json(student)).into_response())
}
