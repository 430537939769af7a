//! HTTP client for the remote board API.

use async_trait::async_trait;
use kanban_core::{AppConfig, KanbanError, KanbanResult};
use kanban_domain::{BoardId, ColumnId, TaskId};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::api::KanbanApi;
use crate::wire::{
    ApiBoard, ApiColumn, ApiTask, BoardPatch, ColumnPatch, ListBody, NewBoard, NewColumn,
    TaskPayload,
};

/// Query shapes tried in order when listing a board's tasks.
const TASK_LIST_SHAPES: [(&str, &str); 3] = [
    ("/tasks", "boardId"),
    ("/tasks", "board_id"),
    ("/items", "boardId"),
];

/// Extract a human-readable message from an error body.
///
/// Tries `message`, then `error`, then falls back to `HTTP <status>`.
fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = json.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    format!("HTTP {}", status)
}

fn transport_error(err: reqwest::Error) -> KanbanError {
    if err.is_timeout() {
        KanbanError::remote(None, format!("Request timed out: {}", err))
    } else {
        KanbanError::remote(None, format!("No response received from API: {}", err))
    }
}

/// `KanbanApi` over HTTP+JSON.
#[derive(Debug, Clone)]
pub struct HttpKanbanApi {
    client: Client,
    base_url: String,
}

impl HttpKanbanApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> KanbanResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| KanbanError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &AppConfig) -> KanbanResult<Self> {
        Self::new(config.effective_api_base_url(), config.effective_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and map transport failures and error statuses to
    /// `KanbanError::Remote`.
    async fn send(&self, request: RequestBuilder) -> KanbanResult<Response> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(code, &body);
        tracing::error!("[API] Response error {}: {}", code, message);
        Err(KanbanError::remote(Some(code), message))
    }

    async fn read_json<T: DeserializeOwned + Send>(response: Response) -> KanbanResult<T> {
        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| KanbanError::Serialization(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned + Send>(&self, path: &str) -> KanbanResult<T> {
        tracing::debug!("GET {}", path);
        let response = self.send(self.client.get(self.url(path))).await?;
        Self::read_json(response).await
    }

    async fn get_list<T: DeserializeOwned + Send>(&self, url: Url) -> KanbanResult<Vec<T>> {
        tracing::debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        let body: ListBody = Self::read_json(response).await?;
        body.into_items()
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: &B,
    ) -> KanbanResult<T> {
        tracing::debug!("POST {}", path);
        let response = self
            .send(self.client.post(self.url(path)).json(body))
            .await?;
        Self::read_json(response).await
    }

    async fn patch<B: Serialize + Sync>(&self, path: &str, body: &B) -> KanbanResult<()> {
        tracing::debug!("PATCH {}", path);
        self.send(self.client.patch(self.url(path)).json(body))
            .await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> KanbanResult<()> {
        tracing::debug!("DELETE {}", path);
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    fn list_url(&self, path: &str, params: &[(&str, &str)]) -> KanbanResult<Url> {
        let url = self.url(path);
        let parsed = if params.is_empty() {
            Url::parse(&url)
        } else {
            Url::parse_with_params(&url, params)
        };
        parsed.map_err(|e| KanbanError::Internal(format!("Invalid API URL: {}", e)))
    }
}

#[async_trait]
impl KanbanApi for HttpKanbanApi {
    async fn list_boards(&self) -> KanbanResult<Vec<ApiBoard>> {
        let url = self.list_url("/boards", &[])?;
        self.get_list(url).await
    }

    async fn get_board(&self, id: &BoardId) -> KanbanResult<ApiBoard> {
        self.get_json(&format!("/boards/{}", id)).await
    }

    async fn create_board(&self, board: &NewBoard) -> KanbanResult<ApiBoard> {
        self.post_json("/boards", board).await
    }

    async fn update_board(&self, id: &BoardId, patch: &BoardPatch) -> KanbanResult<()> {
        self.patch(&format!("/boards/{}", id), patch).await
    }

    async fn delete_board(&self, id: &BoardId) -> KanbanResult<()> {
        self.delete(&format!("/boards/{}", id)).await
    }

    async fn list_columns(&self, board_id: &BoardId) -> KanbanResult<Vec<ApiColumn>> {
        let url = self.list_url(&format!("/boards/{}/cards", board_id), &[])?;
        self.get_list(url).await
    }

    async fn create_column(
        &self,
        board_id: &BoardId,
        column: &NewColumn,
    ) -> KanbanResult<ApiColumn> {
        self.post_json(&format!("/boards/{}/cards", board_id), column)
            .await
    }

    async fn update_column(&self, column_id: &ColumnId, patch: &ColumnPatch) -> KanbanResult<()> {
        self.patch(&format!("/cards/{}", column_id), patch).await
    }

    async fn delete_column(&self, column_id: &ColumnId) -> KanbanResult<()> {
        self.delete(&format!("/cards/{}", column_id)).await
    }

    /// Tries each known query shape in turn. Only when all of them fail is the
    /// board treated as having no tasks.
    async fn list_tasks(&self, board_id: &BoardId) -> KanbanResult<Vec<ApiTask>> {
        for (path, param) in TASK_LIST_SHAPES {
            let url = self.list_url(path, &[(param, board_id.as_str())])?;
            match self.get_list(url).await {
                Ok(tasks) => return Ok(tasks),
                Err(e) => {
                    tracing::warn!(
                        "Loading tasks via {}?{}= failed, trying next shape: {}",
                        path,
                        param,
                        e
                    );
                }
            }
        }
        tracing::error!("All task endpoints failed for board {}", board_id);
        Ok(Vec::new())
    }

    async fn create_task(&self, board_id: &BoardId, task: &TaskPayload) -> KanbanResult<ApiTask> {
        let payload = task.clone().with_board(board_id.clone());
        self.post_json("/tasks", &payload).await
    }

    async fn update_task(
        &self,
        task_id: &TaskId,
        task: &TaskPayload,
    ) -> KanbanResult<Option<ApiTask>> {
        let path = format!("/tasks/{}", task_id);
        tracing::debug!("PUT {}", path);
        let response = self.send(self.client.put(self.url(&path)).json(task)).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        // Some deployments answer with an empty body or a status envelope.
        Ok(serde_json::from_slice::<ApiTask>(&bytes).ok())
    }

    async fn delete_task(&self, task_id: &TaskId) -> KanbanResult<()> {
        self.delete(&format!("/tasks/{}", task_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(404, r#"{"message": "No query results for model"}"#),
            "No query results for model"
        );
        assert_eq!(
            extract_error_message(422, r#"{"error": "title is required"}"#),
            "title is required"
        );
        assert_eq!(extract_error_message(500, "<html>oops</html>"), "HTTP 500");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = HttpKanbanApi::new("http://localhost:9/api/v1/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.base_url(), "http://localhost:9/api/v1");
        assert_eq!(api.url("/boards"), "http://localhost:9/api/v1/boards");
    }
}
