use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the fixtures provider.
///
/// Only ever fails the ingestion step; reads that trigger ingestion carry on
/// with whatever is already stored.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("fixture feed API key is not configured")]
    MissingApiKey,
    #[error("fixture feed request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("fixture feed returned status {0}")]
    Status(StatusCode),
    #[error("fixture feed returned a malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("fixture provider reported errors: {0}")]
    Provider(String),
}
