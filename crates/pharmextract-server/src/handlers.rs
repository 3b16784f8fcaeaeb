//! HTTP request handlers for the extraction service.
//!
//! Implements prediction, saved-result retrieval and health check endpoints
//! using axum, and serves the browser UI from a static directory.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use pharmextract_domain::{ExtractionRecord, ExtractionResult};
use pharmextract_extractor::{
    ExtractionError, ExtractionService, PredictOutcome, PredictRequest, SavedResult,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::error;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Extraction pipeline and result log
    pub service: Arc<ExtractionService>,
    /// Browser UI directory; no UI routes without one
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Wrap a service for sharing across requests
    pub fn new(service: ExtractionService) -> Self {
        Self {
            service: Arc::new(service),
            static_dir: None,
        }
    }

    /// Serve `GET /` and `/static/*` from a directory
    pub fn with_static_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.static_dir = Some(dir.as_ref().to_path_buf());
        self
    }
}

/// Records returned by a prediction
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictedExtractions {
    /// Normalized records in order of appearance
    pub extractions: Vec<ExtractionRecord>,
}

/// Prediction response
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Normalized records
    pub result: PredictedExtractions,
    /// Status line naming the output file
    pub message: String,
    /// Number of records
    pub extractions_count: usize,
    /// Domain actually used; an unknown key in the request is reported as the default ("medical")
    pub examples_type: String,
    /// Model that was called
    pub model_used: String,
    /// Present when the result could not be saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<PredictOutcome> for PredictResponse {
    fn from(outcome: PredictOutcome) -> Self {
        let message = outcome.message();
        let extractions_count = outcome.extractions_count();
        Self {
            result: PredictedExtractions {
                extractions: outcome.result.extractions,
            },
            message,
            extractions_count,
            examples_type: outcome.examples_type.to_string(),
            model_used: outcome.model_used,
            warning: outcome.persistence_warning,
        }
    }
}

/// Saved result response
#[derive(Debug, Serialize, Deserialize)]
pub struct SavedResultsResponse {
    /// Most recent stored result, normalized
    pub result: ExtractionResult,
    /// Status line
    pub message: String,
    /// Number of records
    pub extractions_count: usize,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "ok" while the process serves requests
    pub status: String,
    /// Whether predictions can reach the gateway
    pub api_key_configured: bool,
    /// Result log location
    pub output_path: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// The request body could not be used
    BadRequest(String),
    /// Extraction pipeline error
    Extraction(ExtractionError),
    /// Nothing to return
    NotFound(String),
    /// Internal server error
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Extraction(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Extraction(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            error!("{}", message);
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        AppError::Extraction(e)
    }
}

/// POST /predict - Extract, normalize and save
///
/// The pipeline runs on its own task, so a client that disconnects does not
/// stop the result from being saved.
async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let service = Arc::clone(&state.service);
    let outcome = tokio::spawn(async move { service.predict(request).await })
        .await
        .map_err(|e| AppError::InternalError(format!("Extraction failed: {}", e)))??;

    Ok(Json(outcome.into()))
}

/// GET /saved_results - Most recently saved result
async fn saved_results(State(state): State<AppState>) -> Result<Json<SavedResultsResponse>, AppError> {
    let saved = state
        .service
        .load_saved_results()
        .await
        .map_err(|e| AppError::InternalError(format!("Error reading saved results: {}", e)))?;

    match saved {
        SavedResult::Missing { message } => Err(AppError::NotFound(message)),
        SavedResult::Found { result, message } => Ok(Json(SavedResultsResponse {
            extractions_count: result.len(),
            result,
            message,
        })),
    }
}

/// GET /health - Liveness and configuration check
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let config = state.service.config();
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        api_key_configured: config.has_api_key(),
        output_path: config.output_path.display().to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/predict", post(predict))
        .route("/saved_results", get(saved_results))
        .route("/health", get(health_check));

    if let Some(dir) = &state.static_dir {
        router = router
            .route_service("/", ServeFile::new(dir.join("index.html")))
            .nest_service("/static", ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
