//! StudentStorage and CourseStorage implementations for SQLite.

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

use crate::core::{CourseStorage, StudentStorage};
use crate::error::{BackendError, ResourceError, StorageError, StorageResult, ValidationError};
use crate::types::{
    Course, CourseChanges, CourseFilter, CourseId, NewCourse, NewStudent, Student, StudentFilter,
    StudentId,
};

use super::SqliteBackend;
use super::schema::{SCHEMA_VERSION, read_schema_version};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

fn corrupt_data(message: String) -> StorageError {
    StorageError::Backend(BackendError::CorruptData {
        backend_name: "sqlite".to_string(),
        message,
    })
}

fn parse_birth_date(id: i64, raw: &str) -> StorageResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| corrupt_data(format!("student {} has invalid birth_date '{}': {}", id, raw, e)))
}

#[async_trait]
impl StudentStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn health_check(&self) -> StorageResult<()> {
        let conn = self.get_connection().map_err(|e| {
            StorageError::Backend(BackendError::Unavailable {
                backend_name: "sqlite".to_string(),
                message: e.to_string(),
            })
        })?;

        let version = read_schema_version(&conn)?;
        if version < SCHEMA_VERSION {
            return Err(StorageError::Backend(BackendError::Unavailable {
                backend_name: "sqlite".to_string(),
                message: format!(
                    "schema version {} is behind {}, run init_schema",
                    version, SCHEMA_VERSION
                ),
            }));
        }
        Ok(())
    }

    async fn create_student(&self, student: NewStudent) -> StorageResult<Student> {
        student.validate()?;
        let conn = self.get_connection()?;

        conn.execute(
            "INSERT INTO students (name, birth_date) VALUES (?1, ?2)",
            params![
                student.name,
                student.birth_date.format(DATE_FORMAT).to_string()
            ],
        )
        .map_err(|e| internal_error(format!("Failed to insert student: {}", e)))?;

        let id = StudentId::new(conn.last_insert_rowid());
        tracing::debug!(student_id = %id, "Student inserted");
        Ok(student.into_student(id))
    }

    async fn read_student(&self, id: StudentId) -> StorageResult<Option<Student>> {
        let conn = self.get_connection()?;
        let row = conn
            .query_row(
                "SELECT name, birth_date FROM students WHERE id = ?1",
                [id.get()],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read student: {}", e)))?;

        match row {
            Some((name, birth_date)) => Ok(Some(Student {
                id,
                name,
                birth_date: parse_birth_date(id.get(), &birth_date)?,
            })),
            None => Ok(None),
        }
    }

    async fn list_students(&self, filter: &StudentFilter) -> StorageResult<Vec<Student>> {
        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, birth_date FROM students
                 WHERE (?1 IS NULL OR id = ?1) AND (?2 IS NULL OR name = ?2)
                 ORDER BY id",
            )
            .map_err(|e| internal_error(format!("Failed to prepare student query: {}", e)))?;

        let rows = stmt
            .query_map(
                params![filter.id.map(StudentId::get), filter.name.as_deref()],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .map_err(|e| internal_error(format!("Failed to list students: {}", e)))?;

        let mut students = Vec::new();
        for row in rows {
            let (id, name, birth_date) =
                row.map_err(|e| internal_error(format!("Failed to read student row: {}", e)))?;
            students.push(Student {
                id: StudentId::new(id),
                name,
                birth_date: parse_birth_date(id, &birth_date)?,
            });
        }
        Ok(students)
    }

    async fn count_students(&self) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[async_trait]
impl CourseStorage for SqliteBackend {
    async fn create_course(&self, course: NewCourse) -> StorageResult<Course> {
        course.validate()?;
        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        ensure_students_exist(&tx, &course.students)?;

        tx.execute("INSERT INTO courses (name) VALUES (?1)", [&course.name])
            .map_err(|e| internal_error(format!("Failed to insert course: {}", e)))?;
        let id = CourseId::new(tx.last_insert_rowid());

        insert_enrollments(&tx, id, &course.students)?;

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit course: {}", e)))?;

        tracing::debug!(
            course_id = %id,
            students = course.students.len(),
            "Course inserted"
        );

        Ok(Course {
            id,
            name: course.name,
            students: course.students,
        })
    }

    async fn read_course(&self, id: CourseId) -> StorageResult<Option<Course>> {
        let conn = self.get_connection()?;
        read_course_row(&conn, id)
    }

    async fn list_courses(&self, filter: &CourseFilter) -> StorageResult<Vec<Course>> {
        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name FROM courses
                 WHERE (?1 IS NULL OR id = ?1) AND (?2 IS NULL OR name = ?2)
                 ORDER BY id",
            )
            .map_err(|e| internal_error(format!("Failed to prepare course query: {}", e)))?;

        let rows = stmt
            .query_map(
                params![filter.id.map(CourseId::get), filter.name.as_deref()],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .map_err(|e| internal_error(format!("Failed to list courses: {}", e)))?;

        let mut courses = Vec::new();
        for row in rows {
            let (id, name) =
                row.map_err(|e| internal_error(format!("Failed to read course row: {}", e)))?;
            let id = CourseId::new(id);
            courses.push(Course {
                id,
                name,
                students: load_enrollments(&conn, id)?,
            });
        }
        Ok(courses)
    }

    async fn update_course(&self, id: CourseId, changes: CourseChanges) -> StorageResult<Course> {
        changes.validate()?;
        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        let mut course =
            read_course_row(&tx, id)?.ok_or_else(|| ResourceError::course_not_found(id))?;

        if let Some(name) = &changes.name {
            tx.execute(
                "UPDATE courses SET name = ?1 WHERE id = ?2",
                params![name, id.get()],
            )
            .map_err(|e| internal_error(format!("Failed to rename course: {}", e)))?;
        }

        if let Some(students) = &changes.students {
            ensure_students_exist(&tx, students)?;
            tx.execute(
                "DELETE FROM course_students WHERE course_id = ?1",
                [id.get()],
            )
            .map_err(|e| internal_error(format!("Failed to clear enrollments: {}", e)))?;
            insert_enrollments(&tx, id, students)?;
        }

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit course update: {}", e)))?;

        changes.apply_to(&mut course);
        tracing::debug!(course_id = %id, "Course updated");
        Ok(course)
    }

    async fn delete_course(&self, id: CourseId) -> StorageResult<()> {
        let conn = self.get_connection()?;
        let deleted = conn
            .execute("DELETE FROM courses WHERE id = ?1", [id.get()])
            .map_err(|e| internal_error(format!("Failed to delete course: {}", e)))?;

        if deleted == 0 {
            return Err(ResourceError::course_not_found(id).into());
        }

        tracing::debug!(course_id = %id, "Course deleted");
        Ok(())
    }

    async fn count_courses(&self) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM courses", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Reads a course row and its enrollments.
fn read_course_row(conn: &Connection, id: CourseId) -> StorageResult<Option<Course>> {
    let name = conn
        .query_row(
            "SELECT name FROM courses WHERE id = ?1",
            [id.get()],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| internal_error(format!("Failed to read course: {}", e)))?;

    match name {
        Some(name) => Ok(Some(Course {
            id,
            name,
            students: load_enrollments(conn, id)?,
        })),
        None => Ok(None),
    }
}

/// Loads the student ids of a course in stored order.
fn load_enrollments(conn: &Connection, id: CourseId) -> StorageResult<Vec<StudentId>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT student_id FROM course_students WHERE course_id = ?1 ORDER BY position",
        )
        .map_err(|e| internal_error(format!("Failed to prepare enrollment query: {}", e)))?;

    let ids = stmt
        .query_map([id.get()], |row| row.get::<_, i64>(0))
        .map_err(|e| internal_error(format!("Failed to load enrollments: {}", e)))?
        .map(|row| row.map(StudentId::new))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| internal_error(format!("Failed to read enrollment row: {}", e)))?;

    Ok(ids)
}

/// Fails with `UnknownStudents` listing every id that has no student row.
fn ensure_students_exist(conn: &Connection, students: &[StudentId]) -> StorageResult<()> {
    let mut stmt = conn
        .prepare_cached("SELECT 1 FROM students WHERE id = ?1")
        .map_err(|e| internal_error(format!("Failed to prepare student lookup: {}", e)))?;

    let mut missing = Vec::new();
    for id in students {
        let exists = stmt
            .exists([id.get()])
            .map_err(|e| internal_error(format!("Failed to look up student: {}", e)))?;
        if !exists {
            missing.push(*id);
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::UnknownStudents { ids: missing }.into())
    }
}

/// Inserts enrollment rows, recording each student's position.
fn insert_enrollments(
    conn: &Connection,
    course: CourseId,
    students: &[StudentId],
) -> StorageResult<()> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO course_students (course_id, student_id, position) VALUES (?1, ?2, ?3)",
        )
        .map_err(|e| internal_error(format!("Failed to prepare enrollment insert: {}", e)))?;

    for (position, student) in students.iter().enumerate() {
        stmt.execute(params![course.get(), student.get(), position as i64])
            .map_err(|e| internal_error(format!("Failed to insert enrollment: {}", e)))?;
    }
    Ok(())
}
