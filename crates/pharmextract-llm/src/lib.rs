//! PharmExtract Extraction Gateways
//!
//! Implementations of the `ExtractionGateway` trait from `pharmextract-domain`.
//!
//! # Gateways
//!
//! - `MockGateway`: Deterministic canned answers for testing
//! - `GeminiGateway`: Hosted Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use pharmextract_domain::{Extraction, ExtractionGateway, GatewayRequest};
//! use pharmextract_llm::MockGateway;
//!
//! # async fn example() {
//! let gateway = MockGateway::new(vec![Extraction::new("sentiment", "strong quarter")]);
//! let request = GatewayRequest {
//!     text: "JPMorgan Chase announces a strong quarter.".to_string(),
//!     prompt_description: "Extract financial entities.".to_string(),
//!     examples: Vec::new(),
//!     model_id: "gemini-2.5-pro".to_string(),
//!     api_key: Some("key".to_string()),
//! };
//! let doc = gateway.extract(&request).await.unwrap();
//! assert_eq!(doc.extractions.len(), 1);
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod parser;
pub mod prompt;

use async_trait::async_trait;
use pharmextract_domain::{AnnotatedDocument, Extraction, ExtractionGateway, GatewayError, GatewayRequest};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub use gemini::GeminiGateway;
pub use parser::parse_model_output;
pub use prompt::PromptBuilder;

/// Mock gateway for deterministic testing
///
/// Returns a canned set of extractions (or a canned error) without any
/// network traffic, and records how often the remote side was reached.
///
/// # Examples
///
/// ```
/// use pharmextract_domain::GatewayError;
/// use pharmextract_llm::MockGateway;
///
/// let gateway = MockGateway::failing(GatewayError::RateLimitExceeded);
/// assert_eq!(gateway.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockGateway {
    answer: Arc<Mutex<Result<Vec<Extraction>, GatewayError>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<GatewayRequest>>>,
    delay: Option<Duration>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockGateway {
    /// Create a mock that answers every call with the given extractions
    pub fn new(extractions: Vec<Extraction>) -> Self {
        Self {
            answer: Arc::new(Mutex::new(Ok(extractions))),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
            delay: None,
        }
    }

    /// Create a mock whose answer is raw model output, parsed like a real answer
    pub fn from_model_output(output: &str) -> Self {
        let mock = Self::default();
        *lock(&mock.answer) = parse_model_output(output);
        mock
    }

    /// Create a mock that fails every call with the given error
    pub fn failing(error: GatewayError) -> Self {
        let mock = Self::default();
        *lock(&mock.answer) = Err(error);
        mock
    }

    /// Sleep before answering, to exercise timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the canned answer
    pub fn set_extractions(&self, extractions: Vec<Extraction>) {
        *lock(&self.answer) = Ok(extractions);
    }

    /// Get the number of times the remote side was reached
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The most recent request that reached the remote side
    pub fn last_request(&self) -> Option<GatewayRequest> {
        lock(&self.last_request).clone()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl ExtractionGateway for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn extract_remote(
        &self,
        request: &GatewayRequest,
    ) -> Result<AnnotatedDocument, GatewayError> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_request) = Some(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let answer = lock(&self.answer).clone();
        answer.map(|extractions| AnnotatedDocument::new(request.text.clone(), extractions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GatewayRequest {
        GatewayRequest {
            text: "Grade 3-4 adverse events were reported in 42% of patients.".to_string(),
            prompt_description: "Structure the report.".to_string(),
            examples: Vec::new(),
            model_id: "gemini-2.5-pro".to_string(),
            api_key: Some("test-key".to_string()),
        }
    }

    #[tokio::test]
    async fn test_mock_gateway_returns_canned_extractions() {
        let gateway = MockGateway::new(vec![
            Extraction::new("analysis_body", "Grade 3-4 adverse events were reported in 42% of patients.")
                .with_attribute("safety_level", "warning"),
        ]);

        let doc = gateway.extract(&request()).await.unwrap();
        assert_eq!(doc.extractions.len(), 1);
        assert_eq!(doc.text, request().text);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_gateway_error() {
        let gateway = MockGateway::failing(GatewayError::Communication("offline".to_string()));
        let result = gateway.extract(&request()).await;
        assert!(matches!(result, Err(GatewayError::Communication(_))));
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_gateway_from_model_output() {
        let gateway = MockGateway::from_model_output(
            r#"{"extractions": [{"category": "report_header", "text": "STUDY ID: CV-STATIN-2024"}]}"#,
        );
        let doc = gateway.extract(&request()).await.unwrap();
        assert_eq!(doc.extractions[0].extraction_class, "report_header");
    }

    #[tokio::test]
    async fn test_mock_gateway_records_request() {
        let gateway = MockGateway::default();
        gateway.extract(&request()).await.unwrap();
        let seen = gateway.last_request().unwrap();
        assert_eq!(seen.model_id, "gemini-2.5-pro");
    }

    #[tokio::test]
    async fn test_mock_gateway_clone_shares_state() {
        let gateway1 = MockGateway::default();
        let gateway2 = gateway1.clone();

        gateway1.extract(&request()).await.unwrap();

        assert_eq!(gateway1.call_count(), 1);
        assert_eq!(gateway2.call_count(), 1);

        gateway2.reset_call_count();
        assert_eq!(gateway1.call_count(), 0);
    }
}
