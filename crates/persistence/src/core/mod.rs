//! Core storage traits and abstractions.
//!
//! ```text
//! StudentStorage
//!     └── CourseStorage
//! ```
//!
//! Backends implement both; the REST layer only depends on the traits.

mod storage;

pub use storage::{CourseStorage, StudentStorage};
