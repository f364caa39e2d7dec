//! Test data fixtures.

use chrono::NaiveDate;
use coursework_persistence::backends::sqlite::SqliteBackend;
use coursework_persistence::core::{CourseStorage, StudentStorage};
use coursework_persistence::types::{Course, NewCourse, NewStudent, Student, StudentId};
use serde_json::{Value, json};

/// Student and course factories backed by the test database.
pub struct Fixtures<'a> {
    backend: &'a SqliteBackend,
}

impl<'a> Fixtures<'a> {
    /// Creates fixtures over `backend`.
    pub fn new(backend: &'a SqliteBackend) -> Self {
        Self { backend }
    }

    /// Creates one student.
    pub async fn student(&self, name: &str, birth_date: &str) -> Student {
        self.backend
            .create_student(NewStudent::new(name, date(birth_date)))
            .await
            .expect("Failed to seed student")
    }

    /// Creates `count` students with generated names.
    pub async fn students(&self, count: usize) -> Vec<Student> {
        let mut students = Vec::with_capacity(count);
        for i in 0..count {
            students.push(self.student(&format!("student_{}", i), "2000-01-01").await);
        }
        students
    }

    /// Creates one course.
    pub async fn course(&self, name: &str, students: &[StudentId]) -> Course {
        self.backend
            .create_course(NewCourse::new(name, students.to_vec()))
            .await
            .expect("Failed to seed course")
    }

    /// Creates `count` empty courses with generated names.
    pub async fn courses(&self, count: usize) -> Vec<Course> {
        let mut courses = Vec::with_capacity(count);
        for i in 0..count {
            courses.push(self.course(&format!("course_{}", i), &[]).await);
        }
        courses
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("invalid fixture date")
}

/// Returns the ids of `students`.
pub fn ids(students: &[Student]) -> Vec<StudentId> {
    students.iter().map(|s| s.id).collect()
}

/// JSON body for a course.
pub fn course_body(name: &str, students: &[StudentId]) -> Value {
    json!({ "name": name, "students": students })
}

/// Form body for a course, repeating the `students` key per id.
pub fn course_form(name: &str, students: &[StudentId]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("name", name);
    for id in students {
        serializer.append_pair("students", &id.to_string());
    }
    serializer.finish()
}
