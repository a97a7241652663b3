//! Upload batch orchestration.
//!
//! Files are uploaded strictly one at a time: sequential dispatch bounds
//! backend load and gives a stable progress signal. Each item is an
//! independent unit of work whose failure is terminal within the batch;
//! retrying is the caller's decision (re-select and re-submit).

use lore_core::backend::DocumentIngestor;
use lore_core::session::IdentityProvider;
use lore_core::upload::{BatchResult, UploadItem};
use std::sync::Arc;

/// Pre-upload selection state: items may be added (multi-select) and
/// individually removed before submission. Removing an item has no effect
/// on any other item's outcome.
#[derive(Debug, Default)]
pub struct UploadSelection {
    items: Vec<UploadItem>,
}

impl UploadSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one item to the selection.
    pub fn add(&mut self, item: UploadItem) {
        self.items.push(item);
    }

    /// Adds several items at once.
    pub fn add_all(&mut self, items: impl IntoIterator<Item = UploadItem>) {
        self.items.extend(items);
    }

    /// Removes the item at `index`, returning it if present.
    pub fn remove(&mut self, index: usize) -> Option<UploadItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the selection for submission.
    pub fn take(&mut self) -> Vec<UploadItem> {
        std::mem::take(&mut self.items)
    }
}

/// Orchestrates one upload batch against the ingestion backend.
pub struct UploadBatchService {
    ingestor: Arc<dyn DocumentIngestor>,
    identity: Arc<dyn IdentityProvider>,
}

impl UploadBatchService {
    pub fn new(ingestor: Arc<dyn DocumentIngestor>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { ingestor, identity }
    }

    /// Uploads all items sequentially and returns the aggregate result.
    pub async fn upload_all(&self, items: &[UploadItem]) -> BatchResult {
        self.upload_all_with_progress(items, |_, _, _| {}).await
    }

    /// Uploads all items sequentially, reporting `(position, total, name)`
    /// before each dispatch.
    ///
    /// Per-item failures increment the failure counter and the batch moves
    /// on; if the session disappears mid-batch, the remaining items are
    /// recorded as failures without being dispatched so nothing is
    /// ingested under a stale identity.
    pub async fn upload_all_with_progress(
        &self,
        items: &[UploadItem],
        mut on_progress: impl FnMut(usize, usize, &str),
    ) -> BatchResult {
        let total = items.len();
        let mut result = BatchResult::default();

        for (index, item) in items.iter().enumerate() {
            on_progress(index + 1, total, &item.name);
            tracing::info!(file = %item.name, "Uploading {}/{}: {}", index + 1, total, item.name);

            if self.identity.current_session().is_none() {
                tracing::warn!(file = %item.name, "session cleared mid-batch, skipping upload");
                result.record_failure(&item.name);
                continue;
            }

            match self.ingestor.ingest(item).await {
                Ok(chunks_added) => {
                    result.record_success(&item.name, chunks_added);
                }
                Err(err) => {
                    tracing::warn!(file = %item.name, error = %err, "upload failed");
                    result.record_failure(&item.name);
                }
            }
        }

        result
    }
}
