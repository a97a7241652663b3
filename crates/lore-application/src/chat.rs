//! Chat turn orchestration.
//!
//! Drives one request/response turn: the user's message lands in the local
//! log immediately, the backend is asked for an answer, and the reply (or a
//! fixed failure notice standing in for it) is appended and persisted the
//! same way. The log therefore contains one user/assistant pair for every
//! accepted send, successful or not.

use lore_core::backend::AnswerService;
use lore_core::history::{HistoryStore, Message};
use lore_core::session::IdentityProvider;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Notice shown when the backend answered with a failure status.
pub const HTTP_FAILURE_NOTICE: &str = "Sorry, I encountered an error.";
/// Notice shown when the backend could not be reached at all.
pub const TRANSPORT_FAILURE_NOTICE: &str = "Error connecting to server.";

/// What happened to one `send` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The turn ran to completion; `reply` is the assistant message that
    /// was appended (an answer or a failure notice).
    Completed { reply: Message },
    /// Another turn was in flight; this call contributed nothing.
    RejectedBusy,
    /// The input was blank after trimming; no-op.
    IgnoredEmpty,
}

/// Clears the loading flag when the turn exits, on every path.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Orchestrates chat turns on top of the history store.
///
/// At most one turn may be in flight at a time; concurrent sends are
/// rejected so turns land in the log in call order.
pub struct ChatTurnService {
    history: Arc<HistoryStore>,
    assistant: Arc<dyn AnswerService>,
    identity: Arc<dyn IdentityProvider>,
    in_flight: AtomicBool,
}

impl ChatTurnService {
    pub fn new(
        history: Arc<HistoryStore>,
        assistant: Arc<dyn AnswerService>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            history,
            assistant,
            identity,
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while a turn is in flight; the UI uses this to disable
    /// re-submission and show a pending indicator.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// The history store this service appends to.
    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    /// Runs one conversation turn.
    ///
    /// Blank input is a no-op, and a turn already in flight rejects the
    /// call. Otherwise the user message is appended and persisted
    /// immediately, the backend is queried, and the reply or failure
    /// notice is appended and persisted identically. The caller never
    /// blocks on persistence.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SendOutcome::IgnoredEmpty;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return SendOutcome::RejectedBusy;
        }
        let _guard = LoadingGuard(&self.in_flight);

        let user_message = Message::user(trimmed);
        let user_timestamp = user_message.timestamp_ms;
        self.history.append(user_message.clone()).await;
        self.persist_if_current(user_message);

        let content = match self.assistant.ask(trimmed).await {
            Ok(answer) => answer,
            Err(err) if err.is_transport() => {
                tracing::warn!(error = %err, "backend unreachable, substituting notice");
                TRANSPORT_FAILURE_NOTICE.to_string()
            }
            Err(err) => {
                tracing::warn!(error = %err, "backend answered with failure, substituting notice");
                HTTP_FAILURE_NOTICE.to_string()
            }
        };

        let reply = Message::assistant_after(content, user_timestamp);
        self.history.append(reply.clone()).await;
        self.persist_if_current(reply.clone());

        SendOutcome::Completed { reply }
    }

    /// Persists a message only while the session that owns the store is
    /// still current. If the session changed or cleared mid-turn, the
    /// write is discarded rather than attributed to a stale identity.
    fn persist_if_current(&self, message: Message) {
        let still_current = self
            .identity
            .current_session()
            .is_some_and(|session| session.user_id == self.history.user_id());
        if still_current {
            self.history.persist(message);
        } else {
            tracing::warn!(
                user_id = %self.history.user_id(),
                "session no longer current, discarding persistence of chat message"
            );
        }
    }
}
