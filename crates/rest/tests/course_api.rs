//! Course API tests.
//!
//! Covers the course endpoints end to end:
//! - retrieve, list, filter by id and name
//! - create (JSON, form and multipart bodies), partial and full update, delete
//! - the per-course enrollment limit

mod common;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use coursework_persistence::core::{CourseStorage, StudentStorage};
use coursework_persistence::types::StudentId;
use serde_json::{Value, json};

use common::fixtures::{course_body, course_form, ids};
use common::harness::TestApp;

// =============================================================================
// Read Tests
// =============================================================================

#[tokio::test]
async fn test_retrieve_course() {
    let app = TestApp::new();
    let courses = app.fixtures().courses(1).await;

    let response = app
        .server
        .get(&app.url(&format!("/courses/{}/", courses[0].id)))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let data: Value = response.json();
    assert_eq!(data["name"], courses[0].name);
    assert_eq!(data["id"], courses[0].id.get());
    assert_eq!(data["students"], json!([]));
}

#[tokio::test]
async fn test_retrieve_without_trailing_slash() {
    let app = TestApp::new();
    let course = app.fixtures().course("algebra", &[]).await;

    let response = app
        .server
        .get(&app.url(&format!("/courses/{}", course.id)))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_retrieve_missing_course_is_404() {
    let app = TestApp::new();

    let response = app.server.get(&app.url("/courses/999/")).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let data: Value = response.json();
    assert_eq!(data["code"], "not_found");
}

#[tokio::test]
async fn test_non_integer_id_is_404() {
    let app = TestApp::new();

    let response = app.server.get(&app.url("/courses/abc/")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let data: Value = response.json();
    assert_eq!(data["code"], "not_found");

    let response = app
        .server
        .patch(&app.url("/courses/abc/"))
        .json(&json!({"students": []}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app.server.delete(&app.url("/courses/abc/")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_courses_in_creation_order() {
    let app = TestApp::new();
    let courses = app.fixtures().courses(5).await;

    let response = app.server.get(&app.url("/courses/")).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let data: Vec<Value> = response.json();
    assert_eq!(data.len(), courses.len());
    for (listed, course) in data.iter().zip(&courses) {
        assert_eq!(listed["name"], course.name);
    }
}

#[tokio::test]
async fn test_list_filter_by_id() {
    let app = TestApp::new();
    let courses = app.fixtures().courses(5).await;

    let response = app
        .server
        .get(&app.url("/courses/"))
        .add_query_param("id", courses[0].id.get())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let data: Vec<Value> = response.json();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], courses[0].name);
}

#[tokio::test]
async fn test_list_filter_by_name() {
    let app = TestApp::new();
    let courses = app.fixtures().courses(5).await;

    let response = app
        .server
        .get(&app.url("/courses/"))
        .add_query_param("name", &courses[3].name)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let data: Vec<Value> = response.json();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], courses[3].name);
}

#[tokio::test]
async fn test_list_filter_without_match_is_empty() {
    let app = TestApp::new();
    app.fixtures().courses(2).await;

    let response = app
        .server
        .get(&app.url("/courses/"))
        .add_query_param("name", "nope")
        .add_query_param("ordering", "ignored")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let data: Vec<Value> = response.json();
    assert!(data.is_empty());
}

#[tokio::test]
async fn test_list_filter_bad_id_is_400() {
    let app = TestApp::new();

    let response = app
        .server
        .get(&app.url("/courses/"))
        .add_query_param("id", "one")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Create Tests
// =============================================================================

#[tokio::test]
async fn test_create_course() {
    let app = TestApp::new();
    let oleg = app.fixtures().student("Oleg", "1997-01-01").await;
    let vova = app.fixtures().student("Vova", "1994-01-01").await;

    let response = app
        .server
        .post(&app.url("/courses/"))
        .json(&course_body("first_one", &[oleg.id, vova.id]))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["name"], "first_one");
    assert_eq!(created["students"], json!([oleg.id, vova.id]));

    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.ends_with(&format!("/api/v1/courses/{}/", created["id"])));

    let fetched: Value = app
        .server
        .get(&app.url(&format!("/courses/{}/", created["id"])))
        .await
        .json();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_course_from_form() {
    let app = TestApp::new();
    let students = app.fixtures().students(2).await;

    let response = app
        .server
        .post(&app.url("/courses/"))
        .bytes(Bytes::from(course_form("first_one", &ids(&students))))
        .content_type("application/x-www-form-urlencoded")
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["students"], json!(ids(&students)));
}

fn course_multipart(name: &str, students: &[StudentId]) -> MultipartForm {
    students
        .iter()
        .fold(MultipartForm::new().add_text("name", name.to_string()), |form, id| {
            form.add_text("students", id.to_string())
        })
}

#[tokio::test]
async fn test_create_course_from_multipart() {
    let app = TestApp::new();
    let students = app.fixtures().students(2).await;

    let response = app
        .server
        .post(&app.url("/courses/"))
        .multipart(course_multipart("first_one", &ids(&students)))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["name"], "first_one");
    assert_eq!(created["students"], json!(ids(&students)));
}

#[tokio::test]
async fn test_multipart_over_limit_is_rejected() {
    let app = TestApp::with_max_students(2);
    let students = app.fixtures().students(3).await;

    let response = app
        .server
        .post(&app.url("/courses/"))
        .multipart(course_multipart("crowded", &ids(&students)))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let data: Value = response.json();
    assert_eq!(data["field"], "students");
    assert_eq!(app.backend.count_courses().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_without_name_is_400() {
    let app = TestApp::new();

    let response = app
        .server
        .post(&app.url("/courses/"))
        .json(&json!({ "students": [] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let data: Value = response.json();
    assert_eq!(data["field"], "name");
    assert_eq!(app.backend.count_courses().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_with_unknown_student_is_400() {
    let app = TestApp::new();

    let response = app
        .server
        .post(&app.url("/courses/"))
        .json(&json!({ "name": "ghosts", "students": [41, 42] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let data: Value = response.json();
    assert_eq!(data["field"], "students");
    assert_eq!(app.backend.count_courses().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_with_unsupported_content_type_is_415() {
    let app = TestApp::new();

    let response = app
        .server
        .post(&app.url("/courses/"))
        .text("name=first_one")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_create_with_malformed_json_is_400() {
    let app = TestApp::new();

    let response = app
        .server
        .post(&app.url("/courses/"))
        .bytes(Bytes::from_static(b"{\"name\": "))
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Update Tests
// =============================================================================

#[tokio::test]
async fn test_patch_replaces_students() {
    let app = TestApp::new();
    let old = app.fixtures().students(2).await;
    let student = app.fixtures().student("Student_1", "1993-01-10").await;
    let course = app.fixtures().course("algebra", &ids(&old)).await;
    app.fixtures().courses(3).await;

    let response = app
        .server
        .patch(&app.url(&format!("/courses/{}/", course.id)))
        .json(&json!({ "students": [student.id] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let data: Value = response.json();
    assert_eq!(data["students"], json!([student.id]));
    assert_eq!(data["name"], "algebra");
}

#[tokio::test]
async fn test_patch_name_only_keeps_students() {
    let app = TestApp::new();
    let students = app.fixtures().students(2).await;
    let course = app.fixtures().course("algebra", &ids(&students)).await;

    let response = app
        .server
        .patch(&app.url(&format!("/courses/{}/", course.id)))
        .json(&json!({ "name": "geometry" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let data: Value = response.json();
    assert_eq!(data["name"], "geometry");
    assert_eq!(data["students"], json!(ids(&students)));
}

#[tokio::test]
async fn test_patch_missing_course_is_404() {
    let app = TestApp::new();

    let response = app
        .server
        .patch(&app.url("/courses/77/"))
        .json(&json!({ "students": [] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_requires_all_fields() {
    let app = TestApp::new();
    let course = app.fixtures().course("algebra", &[]).await;

    let response = app
        .server
        .put(&app.url(&format!("/courses/{}/", course.id)))
        .json(&json!({ "name": "geometry" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let data: Value = response.json();
    assert_eq!(data["field"], "students");
}

#[tokio::test]
async fn test_put_replaces_course() {
    let app = TestApp::new();
    let students = app.fixtures().students(3).await;
    let course = app.fixtures().course("algebra", &ids(&students[..2])).await;

    let response = app
        .server
        .put(&app.url(&format!("/courses/{}/", course.id)))
        .json(&course_body("geometry", &[students[2].id]))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let data: Value = response.json();
    assert_eq!(data["name"], "geometry");
    assert_eq!(data["students"], json!([students[2].id]));
}

// =============================================================================
// Delete Tests
// =============================================================================

#[tokio::test]
async fn test_delete_course() {
    let app = TestApp::new();
    let students = app.fixtures().students(2).await;
    let course = app.fixtures().course("algebra", &ids(&students)).await;
    app.fixtures().courses(3).await;

    let url = app.url(&format!("/courses/{}/", course.id));
    let response = app.server.delete(&url).await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(response.as_bytes().is_empty());

    let response = app.server.get(&url).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    for student in &students {
        let response = app
            .server
            .get(&app.url(&format!("/students/{}/", student.id)))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }
    assert_eq!(app.backend.count_courses().await.unwrap(), 3);
}

#[tokio::test]
async fn test_delete_missing_course_is_404() {
    let app = TestApp::new();

    let response = app.server.delete(&app.url("/courses/5/")).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Enrollment Limit Tests
// =============================================================================

#[tokio::test]
async fn test_create_under_limit() {
    let app = TestApp::with_max_students(20);
    let students = app.fixtures().students(15).await;

    let response = app
        .server
        .post(&app.url("/courses/"))
        .json(&course_body("first_one", &ids(&students)))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let data: Value = response.json();
    assert_eq!(data["students"].as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_create_exactly_at_limit() {
    let app = TestApp::with_max_students(20);
    let students = app.fixtures().students(20).await;

    let response = app
        .server
        .post(&app.url("/courses/"))
        .json(&course_body("full", &ids(&students)))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_over_limit_is_rejected() {
    let app = TestApp::with_max_students(20);
    let students = app.fixtures().students(21).await;

    let response = app
        .server
        .post(&app.url("/courses/"))
        .json(&course_body("too_big", &ids(&students)))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let data: Value = response.json();
    assert_eq!(data["code"], "invalid");
    assert_eq!(data["field"], "students");
    assert!(data["detail"].as_str().unwrap().contains("1 over the limit"));

    assert_eq!(app.backend.count_courses().await.unwrap(), 0);
    assert_eq!(app.backend.count_students().await.unwrap(), 21);
}

#[tokio::test]
async fn test_duplicate_students_count_once() {
    let app = TestApp::with_max_students(2);
    let students = app.fixtures().students(2).await;
    let repeated = [students[0].id, students[1].id, students[0].id];

    let response = app
        .server
        .post(&app.url("/courses/"))
        .json(&course_body("dupes", &repeated))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let data: Value = response.json();
    assert_eq!(data["students"], json!(ids(&students)));
}

#[tokio::test]
async fn test_patch_over_limit_leaves_course_unchanged() {
    let app = TestApp::with_max_students(3);
    let students = app.fixtures().students(4).await;
    let course = app.fixtures().course("algebra", &ids(&students[..1])).await;

    let response = app
        .server
        .patch(&app.url(&format!("/courses/{}/", course.id)))
        .json(&json!({ "students": ids(&students) }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let stored = app.backend.read_course(course.id).await.unwrap().unwrap();
    assert_eq!(stored, course);
}

#[tokio::test]
async fn test_limit_change_takes_effect_on_next_request() {
    let app = TestApp::with_max_students(2);
    let students = app.fixtures().students(3).await;
    let body = course_body("growing", &ids(&students));

    let response = app.server.post(&app.url("/courses/")).json(&body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    app.state.enrollment_policy().set_max_students(3);

    let response = app.server.post(&app.url("/courses/")).json(&body).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}
