//! History repository over the persistence store's REST contract.
//!
//! Wire shape per record: `{id, role, content, timestamp}`; new records are
//! posted without an id. The store orders by timestamp, but the repository
//! sorts defensively anyway so the in-memory invariant never depends on the
//! remote implementation.

use lore_core::error::{LoreError, Result};
use lore_core::history::{HistoryRepository, Message, MessageRole};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A persisted conversation record as the store returns it.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    role: MessageRole,
    content: String,
    timestamp: i64,
}

impl From<&Message> for HistoryRecord {
    fn from(message: &Message) -> Self {
        Self {
            id: None,
            role: message.role,
            content: message.content.clone(),
            timestamp: message.timestamp_ms,
        }
    }
}

impl From<HistoryRecord> for Message {
    fn from(record: HistoryRecord) -> Self {
        Self {
            id: record.id,
            role: record.role,
            content: record.content,
            timestamp_ms: record.timestamp,
        }
    }
}

/// `HistoryRepository` implementation against the remote persistence store.
#[derive(Clone)]
pub struct RestHistoryRepository {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RestHistoryRepository {
    /// Creates a repository for the given store base URL.
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

    fn endpoint(&self, user_id: &str) -> String {
        format!(
            "{}/api/history/{}",
            self.base_url.trim_end_matches('/'),
            user_id
        )
    }

    fn check_status(response: &reqwest::Response, operation: &str) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(LoreError::api(
                status.as_u16(),
                format!("history {operation} failed"),
            ))
        }
    }
}

#[async_trait]
impl HistoryRepository for RestHistoryRepository {
    async fn fetch_all(&self, user_id: &str) -> Result<Vec<Message>> {
        let response = self
            .client
            .get(self.endpoint(user_id))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| LoreError::transport(format!("history fetch failed: {err}")))?;
        Self::check_status(&response, "fetch")?;

        let records: Vec<HistoryRecord> = response
            .json()
            .await
            .map_err(|err| LoreError::data_access(format!("failed to parse history: {err}")))?;

        let mut messages: Vec<Message> = records.into_iter().map(Message::from).collect();
        messages.sort_by_key(|m| m.timestamp_ms);
        Ok(messages)
    }

    async fn insert(&self, user_id: &str, message: &Message) -> Result<()> {
        self.insert_many(user_id, std::slice::from_ref(message)).await
    }

    async fn insert_many(&self, user_id: &str, messages: &[Message]) -> Result<()> {
        let records: Vec<HistoryRecord> = messages.iter().map(HistoryRecord::from).collect();
        let response = self
            .client
            .post(self.endpoint(user_id))
            .timeout(self.timeout)
            .json(&records)
            .send()
            .await
            .map_err(|err| LoreError::transport(format!("history insert failed: {err}")))?;
        Self::check_status(&response, "insert")
    }

    async fn clear_all(&self, user_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.endpoint(user_id))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| LoreError::transport(format!("history clear failed: {err}")))?;
        Self::check_status(&response, "clear")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trips_to_message() {
        let record = HistoryRecord {
            id: Some("r-1".to_string()),
            role: MessageRole::Assistant,
            content: "hello".to_string(),
            timestamp: 1234,
        };
        let message = Message::from(record);
        assert_eq!(message.id.as_deref(), Some("r-1"));
        assert_eq!(message.timestamp_ms, 1234);

        // Outgoing records never carry an id; the store assigns it.
        let outgoing = HistoryRecord::from(&message);
        assert!(outgoing.id.is_none());
        assert_eq!(outgoing.timestamp, 1234);
    }

    #[test]
    fn test_endpoint_is_scoped_to_user() {
        let repo = RestHistoryRepository::new("http://localhost:8000/");
        assert_eq!(repo.endpoint("u-1"), "http://localhost:8000/api/history/u-1");
    }
}
