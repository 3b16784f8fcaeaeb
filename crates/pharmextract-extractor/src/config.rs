//! Configuration for the extraction service

use pharmextract_domain::ExamplesType;
use pharmextract_llm::gemini::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the extraction service
///
/// Every field has a default, so a partial `[extractor]` table is enough.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Default model identifier when a request does not name one
    pub model_id: String,

    /// JSON Lines file receiving every result
    pub output_path: PathBuf,

    /// Maximum time for a single remote extraction call (seconds)
    pub request_timeout_secs: u64,

    /// Domain used when a request does not name one
    pub default_examples_type: ExamplesType,

    /// Base URL of the Gemini REST API
    pub gateway_base_url: String,

    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Gateway credentials; supplied from the environment, never read from or written to a file
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl ExtractorConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whether non-blank credentials are present
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// Validate the configuration
    ///
    /// A missing API key is not a validation failure: the service starts
    /// without one and each prediction reports the configuration error.
    pub fn validate(&self) -> Result<(), String> {
        if self.model_id.trim().is_empty() {
            return Err("model_id must not be empty".to_string());
        }
        if self.output_path.as_os_str().is_empty() {
            return Err("output_path must not be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.gateway_base_url.trim().is_empty() {
            return Err("gateway_base_url must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            model_id: "gemini-2.5-pro".to_string(),
            output_path: PathBuf::from("extraction_results.jsonl"),
            request_timeout_secs: 120,
            default_examples_type: ExamplesType::default(),
            gateway_base_url: DEFAULT_BASE_URL.to_string(),
            max_text_length: 100_000,
            api_key: None,
        }
    }
}

impl fmt::Debug for ExtractorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorConfig")
            .field("model_id", &self.model_id)
            .field("output_path", &self.output_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("default_examples_type", &self.default_examples_type)
            .field("gateway_base_url", &self.gateway_base_url)
            .field("max_text_length", &self.max_text_length)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
