//! Upload batch domain model.
//!
//! Items are independent units of work: one item is consumed by one upload
//! call and then discarded. Outcomes are accumulated into a batch result
//! that reports full, partial, or total failure.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A file selected for upload. Input only; never persisted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadItem {
    /// Path to the file on the local filesystem.
    pub path: PathBuf,
    /// Original filename, as shown in progress and outcome reporting.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

impl UploadItem {
    /// Builds an item from a filesystem path, reading the size from file
    /// metadata.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size_bytes: metadata.len(),
        })
    }
}

/// The result of one item's upload attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Name of the submitted file.
    pub file_name: String,
    /// Whether the backend accepted and indexed the file.
    pub succeeded: bool,
    /// Number of content chunks the backend indexed; 0 when failed.
    pub chunks_added: usize,
}

/// Aggregate outcome of one upload batch.
///
/// Invariant: `success_count + fail_count` equals the number of submitted
/// items, and `total_chunks_added` sums `chunks_added` over succeeded items
/// only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub success_count: usize,
    pub fail_count: usize,
    pub total_chunks_added: usize,
    /// Per-item outcomes, in submission order.
    pub outcomes: Vec<UploadOutcome>,
}

impl BatchResult {
    /// Records a succeeded item.
    pub fn record_success(&mut self, file_name: impl Into<String>, chunks_added: usize) {
        self.success_count += 1;
        self.total_chunks_added += chunks_added;
        self.outcomes.push(UploadOutcome {
            file_name: file_name.into(),
            succeeded: true,
            chunks_added,
        });
    }

    /// Records a failed item. Failures are terminal within one batch; the
    /// caller may re-select and re-submit.
    pub fn record_failure(&mut self, file_name: impl Into<String>) {
        self.fail_count += 1;
        self.outcomes.push(UploadOutcome {
            file_name: file_name.into(),
            succeeded: false,
            chunks_added: 0,
        });
    }

    /// Number of submitted items this result accounts for.
    pub fn total(&self) -> usize {
        self.success_count + self.fail_count
    }

    /// True when every item succeeded (and at least one was submitted).
    pub fn is_full_success(&self) -> bool {
        self.fail_count == 0
    }

    /// Human-readable aggregate summary.
    ///
    /// Full success, full failure and partial success each get their own
    /// message; the chunk total only ever reports the succeeded subset.
    pub fn summary(&self) -> String {
        if self.fail_count == 0 {
            format!(
                "Success! Uploaded {} file(s), added {} chunks.",
                self.success_count, self.total_chunks_added
            )
        } else if self.success_count == 0 {
            format!("Error: All {} file(s) failed to upload.", self.fail_count)
        } else {
            format!(
                "Partial success: {} succeeded, {} failed. Added {} chunks.",
                self.success_count, self.fail_count, self.total_chunks_added
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_partition_submitted_items() {
        let mut result = BatchResult::default();
        result.record_success("a.pdf", 10);
        result.record_failure("b.pdf");
        result.record_success("c.pdf", 5);

        assert_eq!(result.total(), 3);
        assert_eq!(result.success_count, 2);
        assert_eq!(result.fail_count, 1);
        assert_eq!(result.total_chunks_added, 15);
        assert_eq!(result.outcomes.len(), 3);
        assert_eq!(result.outcomes[1].chunks_added, 0);
    }

    #[test]
    fn test_summary_full_success() {
        let mut result = BatchResult::default();
        result.record_success("a.pdf", 12);
        result.record_success("b.pdf", 8);
        assert_eq!(result.summary(), "Success! Uploaded 2 file(s), added 20 chunks.");
    }

    #[test]
    fn test_summary_full_failure() {
        let mut result = BatchResult::default();
        result.record_failure("a.pdf");
        result.record_failure("b.pdf");
        assert_eq!(result.summary(), "Error: All 2 file(s) failed to upload.");
    }

    #[test]
    fn test_summary_partial() {
        let mut result = BatchResult::default();
        result.record_success("a.pdf", 7);
        result.record_failure("b.pdf");
        assert_eq!(
            result.summary(),
            "Partial success: 1 succeeded, 1 failed. Added 7 chunks."
        );
    }
}
