//! Infrastructure implementations for the Lore client: the in-process
//! identity provider, the REST history repository, and configuration.

pub mod config;
pub mod rest_history_repository;
pub mod session_provider;

pub use config::ClientConfig;
pub use rest_history_repository::RestHistoryRepository;
pub use session_provider::{IdentityPayload, WatchSessionProvider};
