//! Test infrastructure for the persistence layer.

#![allow(dead_code)]

use chrono::NaiveDate;

use coursework_persistence::backends::sqlite::SqliteBackend;
use coursework_persistence::core::StudentStorage;
use coursework_persistence::types::{NewStudent, Student};

/// Creates an in-memory backend with the schema in place.
pub fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

/// Parses a `YYYY-MM-DD` date.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("invalid fixture date")
}

/// Seeds one student.
pub async fn seed_student<S: StudentStorage>(storage: &S, name: &str, birth_date: &str) -> Student {
    storage
        .create_student(NewStudent::new(name, date(birth_date)))
        .await
        .expect("Failed to seed student")
}

/// Seeds `count` students named `student-0`, `student-1`, ...
pub async fn seed_students<S: StudentStorage>(storage: &S, count: usize) -> Vec<Student> {
    let mut students = Vec::with_capacity(count);
    for i in 0..count {
        students.push(seed_student(storage, &format!("student-{}", i), "2000-01-01").await);
    }
    students
}
