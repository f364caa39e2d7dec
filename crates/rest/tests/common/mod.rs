//! Common test utilities for REST API testing.
//!
//! - [`harness`] - Test server wired to an in-memory backend
//! - [`fixtures`] - Student and course factories and request bodies

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
