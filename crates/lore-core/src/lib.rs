//! Core domain for the Lore client: session and role resolution, access
//! gating, the chat history store, upload batch types, and the trait seams
//! to the backend and persistence collaborators.

pub mod backend;
pub mod error;
pub mod history;
pub mod session;
pub mod upload;

// Re-export common error type
pub use error::{LoreError, Result};
