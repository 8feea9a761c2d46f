//! Task API transport.
//!
//! `TaskApi` is the seam between the mirror and the network so the mirror can
//! be exercised against an in-process service.

use crate::error::ClientError;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use taskinbox_core::{Task, TaskId};

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Operations the inbox needs from the task service.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError>;
    /// Sends the title as typed; the server trims it.
    async fn create_task(&self, title: &str) -> Result<Task, ClientError>;
    async fn update_task(&self, id: TaskId, completed: bool) -> Result<Task, ClientError>;
    async fn delete_task(&self, id: TaskId) -> Result<(), ClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
}

/// `reqwest`-backed implementation of `TaskApi`.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Calls `GET /health` and returns the reported status text.
    pub async fn health(&self) -> Result<String, ClientError> {
        let response = self.client.get(self.url("/health")).send().await?;
        let body: HealthBody = ensure_success(response).await?.json().await?;
        Ok(body.status)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn task_url(&self, id: TaskId) -> String {
        self.url(&format!("/tasks/{id}"))
    }
}

impl Default for HttpTaskApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.client.get(self.url("/tasks")).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn create_task(&self, title: &str) -> Result<Task, ClientError> {
        let response = self
            .client
            .post(self.url("/tasks"))
            .json(&json!({ "title": title }))
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn update_task(&self, id: TaskId, completed: bool) -> Result<Task, ClientError> {
        let response = self
            .client
            .patch(self.task_url(id))
            .json(&json!({ "completed": completed }))
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), ClientError> {
        let response = self.client.delete(self.task_url(id)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Passes 2xx responses through and converts everything else to an error,
/// using the `{ "error": ... }` body as the message when present.
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await?;
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        other => ClientError::UnexpectedStatus {
            status: other.as_u16(),
            message,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::HttpTaskApi;

    #[test]
    fn base_url_drops_trailing_slash() {
        let api = HttpTaskApi::new("http://localhost:3001/");
        assert_eq!(api.base_url(), "http://localhost:3001");
        assert_eq!(api.url("/tasks"), "http://localhost:3001/tasks");
    }
}
