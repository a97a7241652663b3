//! Conversation history: message model, repository trait and client store.

pub mod message;
pub mod repository;
pub mod store;

pub use message::{Message, MessageRole};
pub use repository::HistoryRepository;
pub use store::{HistoryState, HistoryStore};
