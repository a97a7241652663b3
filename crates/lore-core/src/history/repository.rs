//! History repository trait.
//!
//! Defines the interface to the remote persistence store that holds the
//! durable conversation log, decoupling the store's state machine from the
//! specific transport (REST, database, in-memory test double).

use super::message::Message;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the per-user conversation log.
///
/// All operations are scoped to one user; the caller supplies the
/// authenticated user id so records are attributed correctly.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Fetches the full conversation log for a user, ordered by timestamp
    /// ascending.
    async fn fetch_all(&self, user_id: &str) -> Result<Vec<Message>>;

    /// Inserts one message into the user's log.
    async fn insert(&self, user_id: &str, message: &Message) -> Result<()>;

    /// Inserts several messages into the user's log in one call.
    async fn insert_many(&self, user_id: &str, messages: &[Message]) -> Result<()>;

    /// Deletes the user's entire log.
    ///
    /// Atomic from the caller's perspective: either every record is gone or
    /// the call fails and the log is unchanged.
    async fn clear_all(&self, user_id: &str) -> Result<()>;
}
