//! Request body extractor.
//!
//! Bodies arrive as JSON objects, HTML-form-encoded pairs or
//! `multipart/form-data` parts. All of them decode into the same field map
//! so that payload parsing does not care which encoding the client used.

use axum::{
    body::Bytes,
    extract::{
        FromRequest, Multipart, Request,
        multipart::{MultipartError, MultipartRejection},
        rejection::BytesRejection,
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

use crate::error::RestError;

/// Decoded request body fields.
///
/// Form and multipart values are kept as strings. A key that repeats (for
/// example `students=1&students=2`) becomes an array of its values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RequestFields(pub Map<String, Value>);

impl RequestFields {
    /// Returns a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Decodes a JSON body. The top level must be an object.
    pub fn from_json(bytes: &[u8]) -> Result<Self, BodyRejection> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(BodyRejection::Malformed(
                "request body must be a JSON object".to_string(),
            )),
            Err(e) => Err(BodyRejection::Malformed(format!("Invalid JSON: {}", e))),
        }
    }

    /// Decodes a form-urlencoded body.
    pub fn from_form(bytes: &[u8]) -> Self {
        let mut fields = Self::default();
        for (key, value) in url::form_urlencoded::parse(bytes) {
            fields.push(key.into_owned(), value.into_owned());
        }
        fields
    }

    /// Decodes the text parts of a multipart body.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, BodyRejection> {
        let mut fields = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let value = field.text().await.map_err(multipart_error)?;
            fields.push(name, value);
        }
        Ok(fields)
    }

    fn push(&mut self, key: String, value: String) {
        let value = Value::String(value);
        match self.0.get_mut(&key) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.0.insert(key, value);
            }
        }
    }
}

fn multipart_error(e: MultipartError) -> BodyRejection {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        BodyRejection::TooLarge(e.body_text())
    } else {
        BodyRejection::Malformed(e.body_text())
    }
}

fn multipart_rejection(e: MultipartRejection) -> BodyRejection {
    BodyRejection::Malformed(e.body_text())
}

/// Error type for body extraction failures.
#[derive(Debug)]
pub enum BodyRejection {
    /// The body could not be read.
    Unreadable(BytesRejection),
    /// The body could not be decoded.
    Malformed(String),
    /// The body exceeded the configured size limit.
    TooLarge(String),
    /// Unsupported content type.
    UnsupportedMediaType(String),
}

impl From<BodyRejection> for RestError {
    fn from(rejection: BodyRejection) -> Self {
        match rejection {
            BodyRejection::Unreadable(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                RestError::PayloadTooLarge {
                    message: e.body_text(),
                }
            }
            BodyRejection::Unreadable(e) => RestError::BadRequest {
                message: e.body_text(),
            },
            BodyRejection::Malformed(message) => RestError::BadRequest { message },
            BodyRejection::TooLarge(message) => RestError::PayloadTooLarge { message },
            BodyRejection::UnsupportedMediaType(content_type) => {
                RestError::UnsupportedMediaType { content_type }
            }
        }
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        RestError::from(self).into_response()
    }
}

impl<S> FromRequest<S> for RequestFields
where
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Must own the string before moving req
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();

        let mime: mime::Mime = content_type
            .parse()
            .map_err(|_| BodyRejection::UnsupportedMediaType(content_type.clone()))?;

        if mime.type_() == mime::MULTIPART && mime.subtype() == mime::FORM_DATA {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(multipart_rejection)?;
            return Self::from_multipart(multipart).await;
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(BodyRejection::Unreadable)?;

        if mime.type_() != mime::APPLICATION {
            return Err(BodyRejection::UnsupportedMediaType(content_type));
        }
        if mime.subtype() == mime::JSON {
            Self::from_json(&bytes)
        } else if mime.subtype() == mime::WWW_FORM_URLENCODED {
            Ok(Self::from_form(&bytes))
        } else {
            Err(BodyRejection::UnsupportedMediaType(content_type))
        }
    }
}
