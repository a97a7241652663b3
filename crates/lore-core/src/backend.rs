//! Backend service traits.
//!
//! The answer backend and the ingestion backend are external collaborators
//! reached over a small HTTP contract. These traits are the seam between
//! the orchestrators and that transport, and what tests stand in for.

use crate::error::Result;
use crate::upload::UploadItem;
use async_trait::async_trait;

/// Generates one answer for one user query.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Sends the user's text as the sole query and returns the answer text.
    ///
    /// Errors distinguish unreachable-backend (`Transport`) from
    /// answered-with-failure (`Api`); both are transient from the
    /// orchestrator's point of view.
    async fn ask(&self, query: &str) -> Result<String>;
}

/// Submits one document for indexing.
#[async_trait]
pub trait DocumentIngestor: Send + Sync {
    /// Uploads one file and returns the number of content chunks the
    /// backend indexed from it.
    async fn ingest(&self, item: &UploadItem) -> Result<usize>;
}
