//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::document::{AnnotatedDocument, ExampleData};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Errors surfaced by an extraction gateway
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Missing or unusable credentials; fatal until the deployment is fixed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request itself cannot be sent (e.g. empty text)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The model answered with something that is not an extraction payload
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Quota or rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),
}

impl GatewayError {
    /// Whether the error is a deployment problem rather than a failed call
    pub fn is_configuration(&self) -> bool {
        matches!(self, GatewayError::Configuration(_))
    }
}

/// Everything one remote extraction call needs
#[derive(Clone)]
pub struct GatewayRequest {
    /// Document text to annotate
    pub text: String,

    /// Task description sent ahead of the examples
    pub prompt_description: String,

    /// Few-shot examples
    pub examples: Vec<ExampleData>,

    /// Model identifier (e.g. "gemini-2.5-pro")
    pub model_id: String,

    /// API key for the hosted model
    pub api_key: Option<String>,
}

impl GatewayRequest {
    /// Check the preconditions that must hold before any remote round-trip
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.api_key().is_none() {
            return Err(GatewayError::Configuration(
                "API key not configured. Set LANGEXTRACT_API_KEY in the environment or .env file."
                    .to_string(),
            ));
        }
        if self.text.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("text is empty".to_string()));
        }
        if self.model_id.trim().is_empty() {
            return Err(GatewayError::Configuration("model_id is empty".to_string()));
        }
        if !is_valid_model_id(&self.model_id) {
            return Err(GatewayError::InvalidRequest(format!(
                "invalid model_id '{}'",
                self.model_id
            )));
        }
        Ok(())
    }

    /// The API key, if one is present and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Model ids end up in a URL path; only `[A-Za-z0-9._-]` is accepted, and
/// never `..`
fn is_valid_model_id(model_id: &str) -> bool {
    !model_id.contains("..")
        && model_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

impl fmt::Debug for GatewayRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayRequest")
            .field("text_len", &self.text.len())
            .field("examples", &self.examples.len())
            .field("model_id", &self.model_id)
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .finish()
    }
}

/// Trait for the hosted extraction call
///
/// Implemented by the infrastructure layer (pharmextract-llm). Implementors
/// provide [`ExtractionGateway::extract_remote`]; callers use
/// [`ExtractionGateway::extract`], which checks the request first so a
/// misconfigured deployment never spends a remote round-trip.
#[async_trait]
pub trait ExtractionGateway: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Perform the remote call; a single attempt, no retry
    async fn extract_remote(
        &self,
        request: &GatewayRequest,
    ) -> Result<AnnotatedDocument, GatewayError>;

    /// Validate the request, then perform the remote call
    async fn extract(&self, request: &GatewayRequest) -> Result<AnnotatedDocument, GatewayError> {
        request.validate()?;
        self.extract_remote(request).await
    }
}
