//! Axum extractors for request data.
//!
//! - [`RequestFields`] - Decode a JSON or form-urlencoded body
//! - [`CoursePayload`], [`StudentPayload`] - Typed bodies built on [`RequestFields`]
//! - [`ListFilter`] - `id` / `name` list filters from the query string
//! - [`RecordId`] - Typed `{id}` path segment

mod body;
mod payload;
mod query;
mod record_id;

pub use body::{BodyRejection, RequestFields};
pub use payload::{CoursePayload, StudentPayload};
pub use query::ListFilter;
pub use record_id::RecordId;
