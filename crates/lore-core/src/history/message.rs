//! Conversation message types.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Represents the role of a message in the conversation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message typed by the user.
    User,
    /// Reply from the assistant (or the fixed failure notice standing in
    /// for one).
    Assistant,
}

/// A single message in the conversation log.
///
/// The in-memory log and the persisted log are both ordered by
/// `timestamp_ms` ascending. `id` is assigned by the persistence store and
/// is absent for messages not yet confirmed persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Opaque identifier assigned by the persistence store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Who produced the message.
    pub role: MessageRole,
    /// Message text.
    pub content: String,
    /// Wall-clock creation time in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

impl Message {
    /// Creates a user message stamped with the current wall-clock time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: None,
            role: MessageRole::User,
            content: content.into(),
            timestamp_ms: Utc::now().timestamp_millis(),
        }
    }

    /// Creates an assistant message stamped with the current wall-clock
    /// time, clamped so it never precedes the triggering user message.
    pub fn assistant_after(content: impl Into<String>, user_timestamp_ms: i64) -> Self {
        Self {
            id: None,
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp_ms: Utc::now().timestamp_millis().max(user_timestamp_ms),
        }
    }
}
