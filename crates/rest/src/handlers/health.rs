//! Health check endpoint handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coursework_persistence::core::CourseStorage;
use tracing::{debug, warn};

use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET /health`
///
/// # Response
///
/// - `200 OK` - Storage answered
/// - `503 Service Unavailable` - Storage check failed
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: CourseStorage + Send + Sync,
{
    debug!("Processing health check request");

    let backend_name = state.storage().backend_name();
    let (status, label) = match state.storage().health_check().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    let body = serde_json::json!({
        "status": label,
        "backend": backend_name,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (status, Json(body)).into_response()
}

/// Liveness probe. Answers as long as the process serves requests.
///
/// `GET /_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe.
///
/// `GET /_readiness`
///
/// Reports the enrollment limit in force along with record counts, which
/// requires a working database.
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: CourseStorage + Send + Sync,
{
    debug!("Processing readiness check request");

    let storage = state.storage();
    let counts = async {
        storage.health_check().await?;
        Ok::<_, coursework_persistence::StorageError>((
            storage.count_courses().await?,
            storage.count_students().await?,
        ))
    }
    .await;

    match counts {
        Ok((courses, students)) => {
            let body = serde_json::json!({
                "status": "ready",
                "backend": storage.backend_name(),
                "max_students_per_course": state.enrollment_policy().max_students(),
                "checks": {
                    "storage": "ok",
                    "courses": courses,
                    "students": students
                }
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            let body = serde_json::json!({
                "status": "not_ready",
                "backend": storage.backend_name(),
                "checks": {
                    "storage": e.to_string()
                }
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}
