//! API error type and its HTTP mapping.

use crate::dto::ErrorBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use taskinbox_core::{TaskServiceError, TaskValidationError};
use thiserror::Error;

/// Client-visible failures. `Display` is the message sent in the body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Task not found")]
    TaskNotFound,
    #[error("Invalid JSON body")]
    InvalidBody,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::TitleRequired | Self::InvalidBody => StatusCode::BAD_REQUEST,
            Self::TaskNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(value: TaskServiceError) -> Self {
        match value {
            TaskServiceError::Validation(TaskValidationError::TitleRequired) => Self::TitleRequired,
            TaskServiceError::TaskNotFound(_) => Self::TaskNotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
