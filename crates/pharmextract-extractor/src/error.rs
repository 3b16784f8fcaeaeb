//! Error types for the extraction service

use pharmextract_domain::GatewayError;
use pharmextract_store::StoreError;
use thiserror::Error;

/// Errors that can occur while serving an extraction request
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The request is unusable as submitted
    #[error("{0}")]
    Validation(String),

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Missing credentials or an unusable deployment setting
    #[error("{0}")]
    Configuration(String),

    /// The remote extraction call failed
    #[error("Extraction failed: {0}")]
    RemoteExtraction(String),

    /// The remote extraction call did not finish in time
    #[error("Extraction failed: timed out after {0}s")]
    Timeout(u64),

    /// Result log error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A background task died before finishing
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExtractionError {
    /// Whether the caller is at fault (maps to a 4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExtractionError::Validation(_) | ExtractionError::TextTooLong(_, _)
        )
    }
}

impl From<GatewayError> for ExtractionError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Configuration(_) => ExtractionError::Configuration(e.to_string()),
            GatewayError::InvalidRequest(msg) => ExtractionError::Validation(msg),
            other => ExtractionError::RemoteExtraction(other.to_string()),
        }
    }
}
