//! API route configuration.

use axum::{Router, routing::get};
use coursework_persistence::core::CourseStorage;

use crate::handlers;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// ## Probes (never prefixed)
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Courses (under the API prefix)
/// - `GET /courses/` - List
/// - `POST /courses/` - Create
/// - `GET /courses/{id}/` - Read
/// - `PUT /courses/{id}/` - Replace
/// - `PATCH /courses/{id}/` - Partial update
/// - `DELETE /courses/{id}/` - Delete
///
/// ## Students (under the API prefix)
/// - `GET /students/` - List
/// - `POST /students/` - Create
/// - `GET /students/{id}/` - Read
///
/// Every prefixed path is also served without its trailing slash.
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: CourseStorage + Send + Sync + 'static,
{
    let prefix = state.config().normalized_prefix().to_string();
    let api = resource_routes::<S>();

    let router = Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>));

    let router = if prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(&prefix, api)
    };

    router.with_state(state)
}

fn resource_routes<S>() -> Router<AppState<S>>
where
    S: CourseStorage + Send + Sync + 'static,
{
    let courses =
        get(handlers::list_courses_handler::<S>).post(handlers::create_course_handler::<S>);
    let course = get(handlers::read_course_handler::<S>)
        .put(handlers::update_course_handler::<S>)
        .patch(handlers::patch_course_handler::<S>)
        .delete(handlers::delete_course_handler::<S>);
    let students =
        get(handlers::list_students_handler::<S>).post(handlers::create_student_handler::<S>);
    let student = get(handlers::read_student_handler::<S>);

    Router::new()
        .route("/courses", courses.clone())
        .route("/courses/", courses)
        .route("/courses/{id}", course.clone())
        .route("/courses/{id}/", course)
        .route("/students", students.clone())
        .route("/students/", students)
        .route("/students/{id}", student.clone())
        .route("/students/{id}/", student)
}
