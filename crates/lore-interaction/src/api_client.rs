//! AssistantApiClient - REST client for the answer and ingestion backend.
//!
//! The backend exposes two endpoints: `POST /api/chat` turns one query into
//! one answer, and `POST /api/upload` ingests one document per call and
//! reports how many content chunks were indexed. Configuration priority:
//! explicit construction > environment variables > defaults.

use lore_core::backend::{AnswerService, DocumentIngestor};
use lore_core::error::{LoreError, Result};
use lore_core::upload::UploadItem;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the assistant backend.
///
/// Every request carries a bounded timeout so a hung backend resolves as a
/// transport failure instead of an unbounded wait.
#[derive(Clone)]
pub struct AssistantApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    answer: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    chunks_added: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl AssistantApiClient {
    /// Creates a client for the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// `LORE_API_URL` overrides the base URL (default
    /// `http://localhost:8000`); `LORE_TIMEOUT_SECS` overrides the request
    /// timeout.
    pub fn try_from_env() -> Self {
        let base_url = env::var("LORE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout = env::var("LORE_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Self::new(base_url).with_timeout(timeout)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Reads the optional `{detail}` body of a failure response.
    async fn failure_detail(response: reqwest::Response) -> String {
        let fallback = "request failed".to_string();
        match response.json::<ErrorBody>().await {
            Ok(ErrorBody { detail: Some(detail) }) => detail,
            _ => fallback,
        }
    }
}

#[async_trait]
impl AnswerService for AssistantApiClient {
    async fn ask(&self, query: &str) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint("api/chat"))
            .timeout(self.timeout)
            .json(&ChatRequest { query })
            .send()
            .await
            .map_err(|err| LoreError::transport(format!("chat request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            // The body carries no turn content on failure.
            return Err(LoreError::api(
                status.as_u16(),
                Self::failure_detail(response).await,
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| LoreError::transport(format!("failed to parse answer: {err}")))?;

        Ok(parsed.answer)
    }
}

#[async_trait]
impl DocumentIngestor for AssistantApiClient {
    async fn ingest(&self, item: &UploadItem) -> Result<usize> {
        let bytes = tokio::fs::read(&item.path).await?;
        let mime = mime_guess::from_path(&item.name).first_or_octet_stream();

        let part = Part::bytes(bytes)
            .file_name(item.name.clone())
            .mime_str(mime.essence_str())
            .map_err(|err| LoreError::internal(format!("invalid mime type: {err}")))?;
        let form = Form::new().part("file", part);

        tracing::debug!(file = %item.name, size_bytes = item.size_bytes, "uploading document");

        let response = self
            .client
            .post(self.endpoint("api/upload"))
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|err| LoreError::transport(format!("upload request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoreError::api(
                status.as_u16(),
                Self::failure_detail(response).await,
            ));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|err| LoreError::transport(format!("failed to parse upload response: {err}")))?;

        Ok(parsed.chunks_added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = AssistantApiClient::new("http://localhost:8000/");
        assert_eq!(client.endpoint("api/chat"), "http://localhost:8000/api/chat");

        let client = AssistantApiClient::new("http://localhost:8000");
        assert_eq!(client.endpoint("api/upload"), "http://localhost:8000/api/upload");
    }

    #[test]
    fn test_default_timeout_is_bounded() {
        let client = AssistantApiClient::new(DEFAULT_API_URL);
        assert_eq!(client.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
