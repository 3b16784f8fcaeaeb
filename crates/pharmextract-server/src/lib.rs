//! PharmExtract Server
//!
//! HTTP surface for the extraction service: `POST /predict`,
//! `GET /saved_results` and `GET /health`.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use pharmextract_domain::GatewayError;
use pharmextract_extractor::ExtractionService;
use pharmextract_llm::GeminiGateway;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The gateway client could not be built
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the extraction service backed by the Gemini gateway
pub fn build_service(config: &ServerConfig) -> Result<ExtractionService, ServerError> {
    let extractor = &config.extractor;
    let gateway = GeminiGateway::with_timeout(
        extractor.gateway_base_url.clone(),
        extractor.request_timeout(),
    )?;
    Ok(ExtractionService::new(Arc::new(gateway), extractor.clone()))
}

/// Start the HTTP server
///
/// Validates configuration, builds the service and serves until the
/// listener fails. A missing API key is logged but does not stop startup.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting PharmExtract");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {}", config.extractor.model_id);
    info!("Output file: {}", config.extractor.output_path.display());

    if !config.extractor.has_api_key() {
        warn!("No API key configured; set LANGEXTRACT_API_KEY in the environment or .env file");
    }

    info!("UI directory: {}", config.server.static_dir.display());
    let state = AppState::new(build_service(&config)?).with_static_dir(&config.server.static_dir);
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_service() {
        let service = build_service(&ServerConfig::default()).unwrap();
        assert_eq!(service.config().model_id, "gemini-2.5-pro");
        assert!(!service.config().has_api_key());
    }

    #[tokio::test]
    async fn test_start_server_rejects_invalid_config() {
        let mut config = ServerConfig::default();
        config.extractor.request_timeout_secs = 0;

        let result = start_server(config).await;
        assert!(matches!(result, Err(ServerError::Config(_))));
    }
}
