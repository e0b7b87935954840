//! REST client for the task collection.
//!
//! Maps [`TaskApi`] calls onto the task endpoints:
//! `GET /tasks`, `POST /tasks`, `PATCH /tasks/{id}`, `DELETE /tasks/{id}`.
//! Non-2xx answers become [`ApiError::Status`] with the message derived by
//! [`extract_error_message`].

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use taskboard_proto::error::extract_error_message;
use taskboard_proto::task::{NewTask, Task, TaskId, TaskPatch};
use url::Url;

use super::{ApiError, TaskApi};

/// Errors that can occur when constructing an [`HttpTaskApi`].
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    /// The base URL is not an absolute http(s) URL.
    #[error("invalid task api url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL uses a scheme other than http or https.
    #[error("unsupported task api url scheme: {0}")]
    UnsupportedScheme(String),

    /// reqwest could not build a client.
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// [`TaskApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    /// Collection URL without a trailing slash, e.g. `http://127.0.0.1:3000/tasks`.
    collection_url: String,
    client: reqwest::Client,
}

impl HttpTaskApi {
    /// Creates a client for the given collection URL.
    ///
    /// `timeout` bounds each whole request; it is the only timeout applied.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] if the URL does not parse, is not
    /// http(s), or the client cannot be built.
    pub fn new(collection_url: &str, timeout: Duration) -> Result<Self, ClientBuildError> {
        let parsed = Url::parse(collection_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientBuildError::UnsupportedScheme(
                parsed.scheme().to_string(),
            ));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            collection_url: collection_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// The collection URL requests are sent to.
    #[must_use]
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: TaskId) -> String {
        format!("{}/{id}", self.collection_url)
    }

    /// Sends a request and turns non-2xx answers into [`ApiError::Status`].
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(content_type.as_deref(), &body);

        tracing::debug!(status = status.as_u16(), %message, "task api request failed");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        tracing::debug!(url = %self.collection_url, "GET tasks");
        let response = self.send(self.client.get(&self.collection_url)).await?;
        Self::decode(response).await
    }

    async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
        tracing::debug!(url = %self.collection_url, "POST task");
        let response = self
            .send(self.client.post(&self.collection_url).json(task))
            .await?;
        Self::decode(response).await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ApiError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "PATCH task");
        let response = self.send(self.client.patch(&url).json(patch)).await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "DELETE task");
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}
