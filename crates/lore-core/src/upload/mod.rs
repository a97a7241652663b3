//! Upload batch types.

pub mod model;

pub use model::{BatchResult, UploadItem, UploadOutcome};
