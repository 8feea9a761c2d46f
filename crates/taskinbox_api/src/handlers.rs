//! Route handlers.
//!
//! Each handler decodes its input, makes exactly one service call and renders
//! the result. Bodies are decoded before the target lookup, so a malformed
//! body is reported even when the id does not exist.

use crate::dto::{CreateTaskRequest, HealthBody, UpdateTaskRequest};
use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use taskinbox_core::{Task, TaskId};

/// `GET /tasks`
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.tasks().list_tasks()?))
}

/// `POST /tasks`
pub async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let request = CreateTaskRequest::decode(content_type(&headers), &body)?;
    let task = state.tasks().create_task(request.title.as_deref())?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PATCH /tasks/{id}`
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Task>, ApiError> {
    let request = UpdateTaskRequest::decode(content_type(&headers), &body)?;
    let id = parse_task_id(&id)?;
    Ok(Json(state.tasks().update_task(id, request.completed)?))
}

/// `DELETE /tasks/{id}`
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_task_id(&id)?;
    state.tasks().delete_task(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /health`
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".to_string(),
    })
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
}

/// Unknown or malformed identifiers cannot name a live task.
fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse().map_err(|_| ApiError::TaskNotFound)
}
