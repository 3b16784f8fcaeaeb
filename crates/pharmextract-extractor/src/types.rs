//! Request and response types for extraction

use pharmextract_domain::{ExamplesType, ExtractionResult};
use serde::Deserialize;
use std::path::PathBuf;

/// Request to extract structured annotations from text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    /// Document text; missing and whitespace-only are both rejected
    #[serde(default)]
    pub text: String,

    /// Domain key selecting prompt and examples ("medical" when absent)
    #[serde(default)]
    pub examples_type: Option<String>,

    /// Model override for this request only
    #[serde(default)]
    pub model_id: Option<String>,
}

impl PredictRequest {
    /// Create a request with default domain and model
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Select the domain
    pub fn with_examples_type(mut self, examples_type: impl Into<String>) -> Self {
        self.examples_type = Some(examples_type.into());
        self
    }

    /// Override the model
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }
}

/// Result of a successful prediction
#[derive(Debug, Clone)]
pub struct PredictOutcome {
    /// Normalized records, as persisted
    pub result: ExtractionResult,

    /// Domain that was actually used
    pub examples_type: ExamplesType,

    /// Model that was actually called
    pub model_used: String,

    /// Log file the result was written to
    pub output_path: PathBuf,

    /// Set when the result could not be persisted
    pub persistence_warning: Option<String>,
}

impl PredictOutcome {
    /// Status line for the caller
    pub fn message(&self) -> String {
        match self.persistence_warning {
            None => format!(
                "Extraction completed and saved to {}",
                self.output_path.display()
            ),
            Some(_) => format!(
                "Extraction completed but could not be saved to {}",
                self.output_path.display()
            ),
        }
    }

    /// Number of records
    pub fn extractions_count(&self) -> usize {
        self.result.len()
    }
}

/// Result of reading back the most recent saved result
#[derive(Debug, Clone, PartialEq)]
pub enum SavedResult {
    /// Nothing usable has been saved yet
    Missing {
        /// Why nothing was returned
        message: String,
    },

    /// The most recent result
    Found {
        /// Normalized stored result
        result: ExtractionResult,
        /// Status line
        message: String,
    },
}
