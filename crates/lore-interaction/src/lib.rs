//! HTTP client for the assistant backend (answer generation and document
//! ingestion).

pub mod api_client;

pub use api_client::AssistantApiClient;
