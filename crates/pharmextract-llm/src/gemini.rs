//! Gemini Gateway Implementation
//!
//! Calls the hosted Gemini `generateContent` REST endpoint with a few-shot
//! extraction prompt and turns the JSON answer into an annotated document.
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - Configurable base URL (tests point it at a local mock server)
//! - Client-side request timeout
//! - Single attempt per call; retrying is the caller's decision
//!
//! # Examples
//!
//! ```no_run
//! use pharmextract_llm::GeminiGateway;
//!
//! let gateway = GeminiGateway::new(pharmextract_llm::gemini::DEFAULT_BASE_URL).unwrap();
//! ```

use crate::parser::parse_model_output;
use crate::prompt::PromptBuilder;
use async_trait::async_trait;
use pharmextract_domain::{AnnotatedDocument, ExtractionGateway, GatewayError, GatewayRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Default Gemini API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default timeout for one extraction request (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Gateway backed by the Gemini `generateContent` API
pub struct GeminiGateway {
    base_url: reqwest::Url,
    client: reqwest::Client,
    temperature: f32,
}

/// Request body for the generateContent API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

/// Response from the generateContent API
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiGateway {
    /// Create a gateway with the default request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a gateway with a specific request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let base_url: String = base_url.into();
        let base_url = reqwest::Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| GatewayError::Configuration(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Configuration(format!(
                "Invalid base URL '{}'",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            client,
            temperature: 0.0,
        })
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// `<base>/models/<model_id>:generateContent`, with the model id
    /// percent-encoded as a single path segment
    fn endpoint(&self, model_id: &str) -> Result<reqwest::Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::Configuration(format!("Invalid base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .push("models")
            .push(&format!("{}:generateContent", model_id));
        Ok(url)
    }

    /// Send the prompt and return the model's raw text answer
    async fn generate(&self, model_id: &str, api_key: &str, prompt: String) -> Result<String, GatewayError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json",
            },
        };

        let response = self
            .client
            .post(self.endpoint(model_id)?)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::ModelNotAvailable(model_id.to_string()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimitExceeded);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let Some(candidate) = parsed.candidates.into_iter().next() else {
            let reason = parsed
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(GatewayError::InvalidResponse(format!("Empty answer: {}", reason)));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GatewayError::InvalidResponse(format!(
                "Empty answer (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl ExtractionGateway for GeminiGateway {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn extract_remote(
        &self,
        request: &GatewayRequest,
    ) -> Result<AnnotatedDocument, GatewayError> {
        let api_key = request
            .api_key()
            .ok_or_else(|| GatewayError::Configuration("API key not configured".to_string()))?;

        let prompt = PromptBuilder::new(
            &request.prompt_description,
            &request.examples,
            &request.text,
        )
        .build();

        info!(
            "Sending {} chars ({} examples) to model {}",
            request.text.len(),
            request.examples.len(),
            request.model_id
        );
        debug!("Prompt length: {} chars", prompt.len());

        let answer = self.generate(&request.model_id, api_key, prompt).await?;

        debug!("Model answer length: {} chars", answer.len());

        let extractions = parse_model_output(&answer)?;

        info!("Model returned {} extractions", extractions.len());

        Ok(AnnotatedDocument::new(request.text.clone(), extractions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(api_key: &str) -> GatewayRequest {
        GatewayRequest {
            text: "Tesla stock plummets after a negative earnings report.".to_string(),
            prompt_description: "Extract financial entities.".to_string(),
            examples: Vec::new(),
            model_id: "gemini-test".to_string(),
            api_key: Some(api_key.to_string()),
        }
    }

    fn answer(text: &str) -> String {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    #[test]
    fn test_endpoint_format() {
        let gateway = GeminiGateway::new("http://localhost:8080/v1beta/").unwrap();
        assert_eq!(
            gateway.endpoint("gemini-2.5-pro").unwrap().as_str(),
            "http://localhost:8080/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_endpoint_keeps_model_id_in_one_segment() {
        let gateway = GeminiGateway::new("http://localhost:8080/v1beta").unwrap();
        assert_eq!(
            gateway.endpoint("../../cachedContents/x").unwrap().as_str(),
            "http://localhost:8080/v1beta/models/..%2F..%2FcachedContents%2Fx:generateContent"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            GeminiGateway::new("not a url"),
            Err(GatewayError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_traversal_model_id_stays_under_models() {
        let mut server = mockito::Server::new_async().await;
        let escaped = server
            .mock("POST", "/cachedContents/x:generateContent")
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let gateway = GeminiGateway::new(server.url()).unwrap();
        let mut req = request("test-key");
        req.model_id = "../../cachedContents/x".to_string();

        // Bypasses request validation to exercise URL construction alone
        let result = gateway.extract_remote(&req).await;
        assert!(result.is_err());
        escaped.assert_async().await;
    }

    #[tokio::test]
    async fn test_extract_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(answer(
                r#"{"extractions": [
                    {"extraction_class": "financial_entity", "extraction_text": "Tesla", "attributes": {"type": "company"}},
                    {"extraction_class": "sentiment", "extraction_text": "plummets", "attributes": {"direction": "negative"}}
                ]}"#,
            ))
            .create_async()
            .await;

        let gateway = GeminiGateway::new(server.url()).unwrap();
        let doc = gateway.extract(&request("test-key")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(doc.extractions.len(), 2);
        assert_eq!(doc.extractions[0].extraction_text, "Tesla");
        assert_eq!(doc.extractions[1].extraction_class, "sentiment");
        assert!(doc.text.starts_with("Tesla stock"));
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(429)
            .create_async()
            .await;

        let gateway = GeminiGateway::new(server.url()).unwrap();
        let err = gateway.extract(&request("test-key")).await.unwrap_err();
        assert_eq!(err, GatewayError::RateLimitExceeded);
    }

    #[tokio::test]
    async fn test_unknown_model() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(404)
            .create_async()
            .await;

        let gateway = GeminiGateway::new(server.url()).unwrap();
        let err = gateway.extract(&request("test-key")).await.unwrap_err();
        assert_eq!(err, GatewayError::ModelNotAvailable("gemini-test".to_string()));
    }

    #[tokio::test]
    async fn test_non_json_answer() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(answer("Sorry, I cannot help with that."))
            .create_async()
            .await;

        let gateway = GeminiGateway::new(server.url()).unwrap();
        let err = gateway.extract(&request("test-key")).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_blocked_prompt() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
            .create_async()
            .await;

        let gateway = GeminiGateway::new(server.url()).unwrap();
        match gateway.extract(&request("test-key")).await {
            Err(GatewayError::InvalidResponse(msg)) => assert!(msg.contains("SAFETY")),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_error() {
        // Nothing listens on port 1
        let gateway = GeminiGateway::with_timeout("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = gateway.extract(&request("test-key")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Communication(_)));
    }
}
