//! HTTP API for the Offer Engine.
//!
//! This module exposes a minimal REST API around the evaluation engine
//! using the [`axum`](https://crates.io/crates/axum) framework.  Front
//! ends post the user's situation, the offer and the values profile as
//! JSON and receive the complete evaluation back.  The engine holds no
//! state between requests; the router only shares the immutable engine
//! constants.

use crate::config::EngineConfig;
use crate::engine::OfferEngine;
use crate::error::EngineError;
use crate::models::{BatchInput, EvaluationInput};
use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across requests.
pub struct AppState {
    pub engine: OfferEngine,
}

/// Body of the single-regime tax endpoints.
#[derive(Debug, Deserialize)]
pub struct GrossRequest {
    pub gross: f64,
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = match self {
            EngineError::InvalidInput { .. } | EngineError::MissingProfileData(_) => {
                StatusCode::BAD_REQUEST
            }
            EngineError::Config(_) | EngineError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(%status, error = %self, "request failed");
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Malformed or mistyped bodies (e.g. a score that does not fit its
/// integer type) are reported like any other invalid input.
fn rejected_body(rejection: JsonRejection) -> EngineError {
    EngineError::invalid("body", rejection.body_text())
}

/// Build the API router around an engine using the given constants.
pub fn build_router(config: EngineConfig) -> Router {
    let state = Arc::new(AppState {
        engine: OfferEngine::new(config),
    });
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/evaluate", post(evaluate_handler))
        .route("/api/evaluate/batch", post(batch_handler))
        .route("/api/tax/salaried", post(salaried_handler))
        .route("/api/tax/self-employed", post(self_employed_handler))
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Handler for POST /api/evaluate
async fn evaluate_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<EvaluationInput>, JsonRejection>,
) -> Result<impl IntoResponse, EngineError> {
    let Json(input) = body.map_err(rejected_body)?;
    let evaluation = app_state.engine.evaluate(&input)?;
    Ok(Json(evaluation))
}

/// Handler for POST /api/evaluate/batch
async fn batch_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<BatchInput>, JsonRejection>,
) -> Result<impl IntoResponse, EngineError> {
    let Json(batch) = body.map_err(rejected_body)?;
    let evaluations = app_state.engine.evaluate_offers(&batch)?;
    Ok(Json(evaluations))
}

async fn salaried_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<GrossRequest>, JsonRejection>,
) -> Result<impl IntoResponse, EngineError> {
    let Json(request) = body.map_err(rejected_body)?;
    let breakdown = app_state.engine.taxes().salaried(request.gross)?;
    Ok(Json(breakdown))
}

async fn self_employed_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<GrossRequest>, JsonRejection>,
) -> Result<impl IntoResponse, EngineError> {
    let Json(request) = body.map_err(rejected_body)?;
    let breakdown = app_state.engine.taxes().self_employed(request.gross)?;
    Ok(Json(breakdown))
}

/// Launch the API server.  This function builds the router from the
/// given engine constants and binds to the supplied address.  It blocks
/// until the server terminates (e.g. when interrupted).
pub async fn serve(addr: SocketAddr, config: EngineConfig) -> Result<()> {
    let router = build_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "offer engine listening");
    axum::serve(listener, router).await?;
    Ok(())
}
