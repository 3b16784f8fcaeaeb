//! Core extraction service: validate, call the gateway, normalize, persist

use crate::catalog::{example_set, resolve_examples_type};
use crate::config::ExtractorConfig;
use crate::error::ExtractionError;
use crate::normalizer::{normalize, normalize_value};
use crate::types::{PredictOutcome, PredictRequest, SavedResult};
use pharmextract_domain::{ExtractionGateway, ExtractionResult, GatewayRequest};
use pharmextract_store::{JsonlResultStore, Latest, StoreError};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Message returned when a request carries no usable text
pub const EMPTY_TEXT_MESSAGE: &str = "No input text provided.";

/// The extraction service turns documents into stored, normalized results
pub struct ExtractionService {
    gateway: Arc<dyn ExtractionGateway>,
    store: JsonlResultStore,
    config: ExtractorConfig,
}

impl ExtractionService {
    /// Create a new service writing to `config.output_path`
    pub fn new(gateway: Arc<dyn ExtractionGateway>, config: ExtractorConfig) -> Self {
        let store = JsonlResultStore::new(config.output_path.clone());
        Self {
            gateway,
            store,
            config,
        }
    }

    /// Service configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Result log
    pub fn store(&self) -> &JsonlResultStore {
        &self.store
    }

    /// Run one extraction end to end
    ///
    /// Nothing is persisted unless the remote call succeeds. A failed write
    /// does not fail the request; it is reported through
    /// [`PredictOutcome::persistence_warning`].
    pub async fn predict(&self, request: PredictRequest) -> Result<PredictOutcome, ExtractionError> {
        if request.text.trim().is_empty() {
            return Err(ExtractionError::Validation(EMPTY_TEXT_MESSAGE.to_string()));
        }

        let text_length = request.text.chars().count();
        if text_length > self.config.max_text_length {
            return Err(ExtractionError::TextTooLong(
                text_length,
                self.config.max_text_length,
            ));
        }

        let examples_type = resolve_examples_type(
            request.examples_type.as_deref(),
            self.config.default_examples_type,
        );
        let model_id = request
            .model_id
            .as_deref()
            .map(str::trim)
            .filter(|model| !model.is_empty())
            .unwrap_or(self.config.model_id.as_str())
            .to_string();

        info!(
            "Starting extraction: examples_type '{}', model '{}', text length {}",
            examples_type, model_id, text_length
        );

        let set = example_set(examples_type);
        let gateway_request = GatewayRequest {
            text: request.text,
            prompt_description: set.prompt_description.to_string(),
            examples: set.examples.clone(),
            model_id: model_id.clone(),
            api_key: self.config.api_key.clone(),
        };

        let start = Instant::now();
        let document = timeout(
            self.config.request_timeout(),
            self.gateway.extract(&gateway_request),
        )
        .await
        .map_err(|_| ExtractionError::Timeout(self.config.request_timeout_secs))??;

        debug!(
            "Gateway '{}' answered in {} ms",
            self.gateway.name(),
            start.elapsed().as_millis()
        );

        let result = normalize(&document);
        info!("Extraction complete: {} records", result.len());

        let persistence_warning = match self.save_result(result.clone()).await {
            Ok(()) => None,
            Err(e) => {
                warn!("Could not save extraction result: {}", e);
                Some(format!("Result could not be saved: {}", e))
            }
        };

        Ok(PredictOutcome {
            result,
            examples_type,
            model_used: model_id,
            output_path: self.config.output_path.clone(),
            persistence_warning,
        })
    }

    /// Append a result to the log
    pub async fn save_result(&self, result: ExtractionResult) -> Result<(), ExtractionError> {
        let store = self.store.clone();
        task::spawn_blocking(move || store.append(&result))
            .await
            .map_err(|e| ExtractionError::Internal(format!("Task join error: {}", e)))??;
        Ok(())
    }

    /// Read back the most recent result
    ///
    /// A corrupt last line is an error; every kind of absence is not.
    pub async fn load_saved_results(&self) -> Result<SavedResult, ExtractionError> {
        let store = self.store.clone();
        let latest: Result<Latest, StoreError> = task::spawn_blocking(move || store.load_latest())
            .await
            .map_err(|e| ExtractionError::Internal(format!("Task join error: {}", e)))?;
        let latest = latest?;

        let message = latest.message().to_string();
        Ok(match latest.into_record() {
            None => {
                debug!("No saved result: {}", message);
                SavedResult::Missing { message }
            }
            Some(record) => SavedResult::Found {
                result: normalize_value(&record),
                message,
            },
        })
    }
}
