//! Path id extractor.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use coursework_persistence::types::RecordKey;

use crate::error::RestError;

/// Extracts the single `{id}` path segment as a typed record id.
///
/// A segment that is not an integer cannot name any record, so it is
/// answered with 404 like any other missing id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId<T>(pub T);

impl<T> RecordId<T> {
    /// Returns the inner id.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<S, T> FromRequestParts<S> for RecordId<T>
where
    S: Send + Sync,
    T: RecordKey,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;
        parse_id(&raw).map(RecordId)
    }
}

fn parse_id<T: RecordKey>(raw: &str) -> Result<T, RestError> {
    raw.parse().map_err(|_| RestError::NotFound {
        resource_type: T::RESOURCE_TYPE.to_string(),
        id: raw.to_string(),
    })
}
