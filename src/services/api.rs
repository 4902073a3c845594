//! HTTP surface over the analysis pipeline
//!
//! - `POST /analyze` (form field `text_data`)
//! - `GET /trades`
//! - `GET /performance`
//! - `GET /health`

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use super::health::HealthState;
use crate::config::ServerConfig;
use crate::error::{BetFootError, Result};
use crate::strategy::Analyzer;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub analyzer: Arc<Analyzer>,
    pub health: Arc<HealthState>,
}

impl ApiState {
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        Self {
            analyzer,
            health: Arc::new(HealthState::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub text_data: String,
}

pub fn create_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/trades", get(trades_handler))
        .route("/performance", get(performance_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(cors)
}

/// HTTP server for the analysis API
pub struct ApiServer {
    state: ApiState,
    config: ServerConfig,
}

impl ApiServer {
    pub fn new(analyzer: Arc<Analyzer>, config: ServerConfig) -> Self {
        Self {
            state: ApiState::new(analyzer),
            config,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let app = create_router(self.state.clone());

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| BetFootError::Validation(format!("invalid listen address: {e}")))?;
        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .await
            .map_err(|e| BetFootError::Internal(format!("API server error: {}", e)))?;

        Ok(())
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// POST /analyze
async fn analyze_handler(State(state): State<ApiState>, Form(form): Form<AnalyzeForm>) -> Response {
    if form.text_data.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "text data required");
    }

    match state.analyzer.analyze(&form.text_data) {
        Ok(analysis) => Json(analysis).into_response(),
        Err(BetFootError::Model(msg)) => error_response(StatusCode::UNPROCESSABLE_ENTITY, msg),
        Err(e) => {
            error!(error = %e, "analyze failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// GET /trades
async fn trades_handler(State(state): State<ApiState>) -> Response {
    match state.analyzer.trades() {
        Ok(trades) => Json(trades).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// GET /performance
async fn performance_handler(State(state): State<ApiState>) -> Response {
    match state.analyzer.performance() {
        Ok(perf) => Json(perf).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// GET /health
async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.health.report())
}
