//! SQLite schema definitions and migrations.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

fn migration_error(step: &str, e: rusqlite::Error) -> StorageError {
    StorageError::Backend(BackendError::MigrationError {
        message: format!("{}: {}", step, e),
    })
}

/// Initialize the database schema.
///
/// Runs every migration newer than the stored version inside one transaction.
pub fn initialize_schema(conn: &mut Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;
    if current_version >= SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .map_err(|e| migration_error("Failed to begin migration", e))?;

    if current_version < 1 {
        create_schema_v1(&tx)?;
    }
    set_schema_version(&tx, SCHEMA_VERSION)?;

    tx.commit()
        .map_err(|e| migration_error("Failed to commit migration", e))?;

    tracing::info!(
        from = current_version,
        to = SCHEMA_VERSION,
        "SQLite schema migrated"
    );
    Ok(())
}

/// Get the current schema version, creating the version table if needed.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| migration_error("Failed to create schema_version table", e))?;

    read_schema_version(conn)
}

/// Read the stored schema version without writing. A database that was never
/// initialized reports version 0.
pub(crate) fn read_schema_version(conn: &Connection) -> StorageResult<i32> {
    let has_table = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |_| Ok(()),
        )
        .optional()
        .map_err(|e| migration_error("Failed to look up schema_version", e))?
        .is_some();
    if !has_table {
        return Ok(0);
    }

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|e| migration_error("Failed to read schema_version", e))?;

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| migration_error("Failed to clear schema_version", e))?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
        .map_err(|e| migration_error("Failed to set schema_version", e))?;
    Ok(())
}

/// Create the schema (version 1).
///
/// Enrolled students keep the order of the request through `position`.
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            birth_date TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS courses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS course_students (
            course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            student_id INTEGER NOT NULL REFERENCES students(id),
            position INTEGER NOT NULL,
            PRIMARY KEY (course_id, student_id)
        );

        CREATE INDEX IF NOT EXISTS idx_course_students_order
            ON course_students(course_id, position);
        CREATE INDEX IF NOT EXISTS idx_course_students_student
            ON course_students(student_id);
        CREATE INDEX IF NOT EXISTS idx_courses_name ON courses(name);
        CREATE INDEX IF NOT EXISTS idx_students_name ON students(name);",
    )
    .map_err(|e| migration_error("Failed to create tables", e))
}
