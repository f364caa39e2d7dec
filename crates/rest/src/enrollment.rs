//! The enrollment rule.
//!
//! A course may hold at most a configured number of students. The check is a
//! pure function over a candidate student list and a maximum; the maximum
//! itself lives in an [`EnrollmentPolicy`] that can be changed while the
//! server runs and is read again on every call.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use coursework_persistence::types::StudentId;

/// Default maximum number of students per course.
pub const DEFAULT_MAX_STUDENTS_PER_COURSE: usize = 20;

/// A student list that exceeds the enrollment limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentViolation {
    /// Number of students requested.
    pub count: usize,
    /// The limit in force when the check ran.
    pub max: usize,
}

impl EnrollmentViolation {
    /// How many students are over the limit.
    pub fn excess(&self) -> usize {
        self.count.saturating_sub(self.max)
    }
}

impl fmt::Display for EnrollmentViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a course can have at most {} students, got {} ({} over the limit)",
            self.max,
            self.count,
            self.excess()
        )
    }
}

impl std::error::Error for EnrollmentViolation {}

/// Checks a candidate student list against `max`.
///
/// The list is expected to be normalized already (no repeated ids). An empty
/// list is always accepted and a list of exactly `max` students is accepted.
pub fn check_enrollment(students: &[StudentId], max: usize) -> Result<(), EnrollmentViolation> {
    if students.len() > max {
        return Err(EnrollmentViolation {
            count: students.len(),
            max,
        });
    }
    Ok(())
}

/// Shared, runtime-adjustable enrollment limit.
///
/// Clones share the same limit.
#[derive(Debug, Clone)]
pub struct EnrollmentPolicy {
    max_students: Arc<AtomicUsize>,
}

impl EnrollmentPolicy {
    /// Creates a policy with the given limit.
    pub fn new(max_students: usize) -> Self {
        Self {
            max_students: Arc::new(AtomicUsize::new(max_students)),
        }
    }

    /// Returns the limit currently in force.
    pub fn max_students(&self) -> usize {
        self.max_students.load(Ordering::SeqCst)
    }

    /// Replaces the limit. Subsequent checks use the new value.
    pub fn set_max_students(&self, max_students: usize) {
        self.max_students.store(max_students, Ordering::SeqCst);
    }

    /// Checks `students` against the current limit.
    pub fn check(&self, students: &[StudentId]) -> Result<(), EnrollmentViolation> {
        check_enrollment(students, self.max_students())
    }
}

impl Default for EnrollmentPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STUDENTS_PER_COURSE)
    }
}
