//! PharmExtract Extractor
//!
//! Turns free-text documents into structured, persisted extraction results.
//!
//! # Overview
//!
//! The service selects a domain prompt and few-shot examples, forwards the
//! document to an extraction gateway, flattens the answer into JSON-safe
//! records and appends them to a JSON Lines log. The most recent result can
//! be read back at any time.
//!
//! # Architecture
//!
//! ```text
//! Text → ExtractionService → ExtractionGateway → Normalizer → JsonlResultStore
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use pharmextract_domain::Extraction;
//! use pharmextract_extractor::{ExtractionService, ExtractorConfig, PredictRequest};
//! use pharmextract_llm::MockGateway;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = MockGateway::new(vec![Extraction::new("financial_entity", "JPMorgan Chase")]);
//! let config = ExtractorConfig {
//!     api_key: Some("key".to_string()),
//!     ..Default::default()
//! };
//! let service = ExtractionService::new(Arc::new(gateway), config);
//!
//! let request = PredictRequest::new("JPMorgan Chase posted record profits.")
//!     .with_examples_type("financial");
//! let outcome = service.predict(request).await?;
//!
//! println!("{}: {} records", outcome.message(), outcome.extractions_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod catalog;
mod config;
mod error;
pub mod normalizer;
mod service;
mod types;


pub use catalog::{example_set, resolve_examples_type, ExampleSet};
pub use config::ExtractorConfig;
pub use error::ExtractionError;
pub use service::{ExtractionService, EMPTY_TEXT_MESSAGE};
pub use types::{PredictOutcome, PredictRequest, SavedResult};
