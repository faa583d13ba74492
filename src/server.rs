//! HTTP boundary
//!
//! Routes:
//! - `POST /api/analyze` with `{ "packageJsonContent": "..." }`
//! - `GET /health`
//!
//! Each analysis runs in its own task so a panic inside one request is
//! reported as a 500 instead of tearing down the connection.

use crate::domain::AnalysisResult;
use crate::error::IoError;
use crate::orchestrator::Analyzer;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Message returned when an analysis task dies unexpectedly
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred during analysis";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

/// Body of `POST /api/analyze`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub package_json_content: Option<String>,
}

/// Body of `GET /health`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `address` and serve until Ctrl-C
pub async fn serve(analyzer: Analyzer, address: SocketAddr) -> Result<(), IoError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| IoError::Bind {
            address: address.to_string(),
            source,
        })?;
    let local = listener.local_addr().unwrap_or(address);
    info!(address = %local, "listening");

    axum::serve(listener, router(AppState::new(analyzer)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| IoError::Serve { source })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> (StatusCode, Json<AnalysisResult>) {
    let content = match payload {
        Ok(Json(request)) => request.package_json_content.unwrap_or_default(),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(AnalysisResult::failed(rejection.body_text())),
            );
        }
    };

    let analyzer = Arc::clone(&state.analyzer);
    let task = tokio::spawn(async move { analyzer.run(&content).await });

    match task.await {
        Ok(Ok(result)) => (StatusCode::OK, Json(result)),
        Ok(Err(e)) => {
            warn!(error = %e, "analysis rejected");
            (StatusCode::BAD_REQUEST, Json(AnalysisResult::failed(e.to_string())))
        }
        Err(e) => {
            error!(error = %e, "analysis task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnalysisResult::failed(INTERNAL_ERROR_MESSAGE)),
            )
        }
    }
}
