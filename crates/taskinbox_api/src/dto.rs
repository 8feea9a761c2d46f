//! Request and response bodies.
//!
//! Request bodies are decoded leniently: fields with the wrong JSON type are
//! treated as absent so the service can apply its own rules (a non-string
//! title is a validation error, a non-boolean `completed` is ignored).
//! Only `application/json` bodies are read; any other content type, an empty
//! body, or a top-level array carries no fields.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskRequest {
    /// `None` when the field is missing or not a string.
    pub title: Option<String>,
}

impl CreateTaskRequest {
    pub fn decode(content_type: Option<&str>, body: &[u8]) -> Result<Self, ApiError> {
        let fields = parse_fields(content_type, body)?;
        Ok(Self {
            title: fields
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

/// Body of `PATCH /tasks/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    /// `None` when the field is missing or not a boolean.
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    pub fn decode(content_type: Option<&str>, body: &[u8]) -> Result<Self, ApiError> {
        let fields = parse_fields(content_type, body)?;
        Ok(Self {
            completed: fields.get("completed").and_then(Value::as_bool),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
}

/// Reads the named fields of a JSON body.
///
/// Malformed JSON and primitive top-level values (`null`, strings, numbers,
/// booleans) are rejected.
fn parse_fields(content_type: Option<&str>, body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if !content_type.is_some_and(is_json) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(Value::Array(_)) => Ok(Map::new()),
        _ => Err(ApiError::InvalidBody),
    }
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
