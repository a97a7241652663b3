//! Client-side chat history store.
//!
//! Owns the ordered in-memory conversation log for the current user and
//! keeps it loosely synchronized with the remote persistence store:
//! reads happen once per session, appends are optimistic, writes are
//! fire-and-forget, and only the destructive clear waits for the remote
//! call to succeed.

use super::message::Message;
use super::repository::HistoryRepository;
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Lifecycle of the store within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    /// No session has been bound yet, or the session ended.
    Uninitialized,
    /// A remote fetch is in progress.
    Loading,
    /// The log is usable (possibly empty).
    Ready,
}

struct Inner {
    state: HistoryState,
    log: Vec<Message>,
}

/// The client-side owner of the conversation log.
///
/// The log is append-only except for a full clear. Losing history must
/// never block the ability to converse: a failed load degrades to an empty
/// usable log, and a failed persist leaves the in-memory log authoritative
/// for the rest of the session.
pub struct HistoryStore {
    repository: Arc<dyn HistoryRepository>,
    user_id: String,
    inner: RwLock<Inner>,
}

impl HistoryStore {
    /// Creates a store bound to the given user's remote log.
    pub fn new(repository: Arc<dyn HistoryRepository>, user_id: impl Into<String>) -> Self {
        Self {
            repository,
            user_id: user_id.into(),
            inner: RwLock::new(Inner {
                state: HistoryState::Uninitialized,
                log: Vec::new(),
            }),
        }
    }

    /// The user id this store attributes persisted records to.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> HistoryState {
        self.inner.read().await.state
    }

    /// A snapshot of the in-memory log, ordered by timestamp ascending.
    pub async fn messages(&self) -> Vec<Message> {
        self.inner.read().await.log.clone()
    }

    /// Number of messages currently in the in-memory log.
    pub async fn len(&self) -> usize {
        self.inner.read().await.log.len()
    }

    /// True when the in-memory log holds no messages.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.log.is_empty()
    }

    /// Loads the persisted log from the remote store.
    ///
    /// Invoked once when a session becomes available. On fetch failure the
    /// store transitions to an empty `Ready` log rather than an error
    /// state: chat stays usable, history is simply unavailable for this
    /// session. The failure is logged, not surfaced.
    pub async fn load(&self) {
        {
            let mut inner = self.inner.write().await;
            inner.state = HistoryState::Loading;
        }

        let fetched = match self.repository.fetch_all(&self.user_id).await {
            Ok(mut messages) => {
                messages.sort_by_key(|m| m.timestamp_ms);
                messages
            }
            Err(err) => {
                tracing::warn!(user_id = %self.user_id, error = %err, "failed to load chat history");
                Vec::new()
            }
        };

        let mut inner = self.inner.write().await;
        inner.log = fetched;
        inner.state = HistoryState::Ready;
    }

    /// Appends a message to the in-memory log immediately.
    ///
    /// Optimistic: independent of whether persistence ever succeeds, so the
    /// user always sees their own input and the assistant's reply without
    /// waiting on a write. Appending also promotes the store to `Ready`.
    pub async fn append(&self, message: Message) {
        let mut inner = self.inner.write().await;
        inner.log.push(message);
        inner.state = HistoryState::Ready;
    }

    /// Writes a message to the remote store, attributed to the bound user.
    ///
    /// Fire-and-forget: the returned handle may be dropped. Failure is
    /// logged, not retried, and never rolls back the optimistic in-memory
    /// append, so the local and durable logs may diverge after a transient
    /// failure.
    pub fn persist(&self, message: Message) -> JoinHandle<()> {
        let repository = Arc::clone(&self.repository);
        let user_id = self.user_id.clone();
        tokio::spawn(async move {
            if let Err(err) = repository.insert(&user_id, &message).await {
                tracing::warn!(user_id = %user_id, error = %err, "failed to persist chat message");
            }
        })
    }

    /// Deletes the entire persisted log, then empties the in-memory log.
    ///
    /// The one place destructive action is not applied optimistically: the
    /// in-memory log is emptied only after the remote deletion succeeds.
    /// On failure the log is left untouched and the error is returned, so
    /// the user is never shown a purge that did not happen.
    pub async fn clear(&self) -> Result<()> {
        self.repository.clear_all(&self.user_id).await?;

        let mut inner = self.inner.write().await;
        inner.log.clear();
        inner.state = HistoryState::Ready;
        Ok(())
    }

    /// Drops all local state when the session ends.
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        inner.log.clear();
        inner.state = HistoryState::Uninitialized;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoreError;
    use crate::history::message::MessageRole;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// In-memory repository with switchable failure modes.
    #[derive(Default)]
    struct FakeRepository {
        records: Mutex<Vec<Message>>,
        fail_fetch: AtomicBool,
        fail_insert: AtomicBool,
        fail_clear: AtomicBool,
    }

    #[async_trait]
    impl HistoryRepository for FakeRepository {
        async fn fetch_all(&self, _user_id: &str) -> Result<Vec<Message>> {
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(LoreError::transport("fetch refused"));
            }
            Ok(self.records.lock().unwrap().clone())
        }

        async fn insert(&self, _user_id: &str, message: &Message) -> Result<()> {
            if self.fail_insert.load(Ordering::SeqCst) {
                return Err(LoreError::transport("insert refused"));
            }
            self.records.lock().unwrap().push(message.clone());
            Ok(())
        }

        async fn insert_many(&self, user_id: &str, messages: &[Message]) -> Result<()> {
            for message in messages {
                self.insert(user_id, message).await?;
            }
            Ok(())
        }

        async fn clear_all(&self, _user_id: &str) -> Result<()> {
            if self.fail_clear.load(Ordering::SeqCst) {
                return Err(LoreError::api(500, "clear failed"));
            }
            self.records.lock().unwrap().clear();
            Ok(())
        }
    }

    fn message_at(content: &str, timestamp_ms: i64) -> Message {
        Message {
            id: None,
            role: MessageRole::User,
            content: content.to_string(),
            timestamp_ms,
        }
    }

    #[tokio::test]
    async fn test_load_orders_by_timestamp() {
        let repo = Arc::new(FakeRepository::default());
        repo.records
            .lock()
            .unwrap()
            .extend([message_at("b", 200), message_at("a", 100)]);

        let store = HistoryStore::new(repo, "u-1");
        store.load().await;

        let log = store.messages().await;
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].content, "a");
        assert_eq!(log[1].content, "b");
        assert_eq!(store.state().await, HistoryState::Ready);
    }

    #[tokio::test]
    async fn test_load_failure_degrades_to_empty_usable_log() {
        let repo = Arc::new(FakeRepository::default());
        repo.fail_fetch.store(true, Ordering::SeqCst);

        let store = HistoryStore::new(repo, "u-1");
        store.load().await;

        assert_eq!(store.state().await, HistoryState::Ready);
        assert!(store.is_empty().await);

        // Chat must remain usable after the failed load.
        store.append(message_at("still works", 1)).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let repo = Arc::new(FakeRepository::default());
        repo.records
            .lock()
            .unwrap()
            .extend([message_at("a", 1), message_at("b", 2)]);

        let store = HistoryStore::new(repo, "u-1");
        store.load().await;
        let first = store.messages().await;
        store.load().await;
        let second = store.messages().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_optimistic_append() {
        let repo = Arc::new(FakeRepository::default());
        repo.fail_insert.store(true, Ordering::SeqCst);

        let store = HistoryStore::new(Arc::clone(&repo) as Arc<dyn HistoryRepository>, "u-1");
        store.load().await;

        let message = message_at("hello", 10);
        store.append(message.clone()).await;
        store.persist(message).await.unwrap();

        // Local log keeps the message even though the write failed.
        assert_eq!(store.len().await, 1);
        assert!(repo.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_success_empties_both_logs() {
        let repo = Arc::new(FakeRepository::default());
        repo.records.lock().unwrap().push(message_at("a", 1));

        let store = HistoryStore::new(Arc::clone(&repo) as Arc<dyn HistoryRepository>, "u-1");
        store.load().await;
        assert_eq!(store.len().await, 1);

        store.clear().await.unwrap();
        assert!(store.is_empty().await);
        assert!(repo.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_failure_leaves_log_untouched() {
        let repo = Arc::new(FakeRepository::default());
        repo.records
            .lock()
            .unwrap()
            .extend([message_at("a", 1), message_at("b", 2)]);

        let store = HistoryStore::new(Arc::clone(&repo) as Arc<dyn HistoryRepository>, "u-1");
        store.load().await;
        let before = store.messages().await;

        repo.fail_clear.store(true, Ordering::SeqCst);
        let result = store.clear().await;

        assert!(result.is_err());
        assert_eq!(store.messages().await, before);
    }

    #[tokio::test]
    async fn test_reset_returns_to_uninitialized() {
        let repo = Arc::new(FakeRepository::default());
        let store = HistoryStore::new(repo, "u-1");
        store.load().await;
        store.append(message_at("a", 1)).await;

        store.reset().await;
        assert_eq!(store.state().await, HistoryState::Uninitialized);
        assert!(store.is_empty().await);
    }
}
