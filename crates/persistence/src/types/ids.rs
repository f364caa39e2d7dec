//! Identifier types.
//!
//! Students and courses are keyed by storage-assigned integers. Each gets its
//! own newtype so a course id can never be passed where a student id is
//! expected.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A typed record key that can be parsed from a URL segment.
pub trait RecordKey: FromStr + fmt::Display + Copy + Send {
    /// Resource type named in not-found errors.
    const RESOURCE_TYPE: &'static str;
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $resource:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database key.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw database key.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl RecordKey for $name {
            const RESOURCE_TYPE: &'static str = $resource;
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

record_id!(
    /// Identifier of a [`Student`](super::Student).
    StudentId,
    "Student"
);

record_id!(
    /// Identifier of a [`Course`](super::Course).
    CourseId,
    "Course"
);
