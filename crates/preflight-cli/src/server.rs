//! HTTP transport for the readiness engine
//!
//! Routes:
//! - `GET /health` liveness and version
//! - `GET /discovery` tool manifest
//! - `POST /analyze` JSON proposal in, analysis out

use crate::config::ServerConfig;
use crate::error::{CliError, CliResult};
use crate::manifest::{discovery_manifest, DiscoveryManifest};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use preflight::{AnalysisResult, PreflightError, ReadinessEngine, TestProposal};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn};
use uuid::Uuid;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Engine shared by all requests
    pub engine: Arc<ReadinessEngine>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            engine: Arc::new(ReadinessEngine::default()),
        }
    }
}

/// `/health` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Error returned by `/analyze`
#[derive(Debug)]
pub struct ApiError(PreflightError);

impl From<PreflightError> for ApiError {
    fn from(err: PreflightError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = if self.0.is_invalid_input() {
            (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string())
        } else {
            warn!(error = %self.0, "analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Analysis failed: {}", self.0),
            )
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn discovery() -> Json<DiscoveryManifest> {
    Json(discovery_manifest())
}

async fn analyze(
    State(state): State<AppState>,
    Json(proposal): Json<TestProposal>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let result = state.engine.analyze(&proposal)?;
    Ok(Json(result))
}

/// Build the router with the default engine
pub fn router(config: &ServerConfig) -> Router {
    router_with_state(config, AppState::default())
}

/// Build the router around an existing engine
pub fn router_with_state(config: &ServerConfig, state: AppState) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .route("/discovery", get(discovery))
        .route("/analyze", post(analyze))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        );

    if config.cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}

fn print_banner(config: &ServerConfig) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Preflight Readiness Service                  ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║  HTTP:      http://{:<42}║", config.authority());
    println!("║  Analyze:   POST /analyze{:<36}║", "");
    println!("║  Discovery: GET  /discovery{:<34}║", "");
    println!(
        "║  CORS:      {:<49}║",
        if config.cors { "enabled" } else { "disabled" }
    );
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║  Press Ctrl+C to stop                                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

/// Bind the configured host and port, resolving host names
pub async fn bind(config: &ServerConfig) -> CliResult<TcpListener> {
    TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|e| CliError::server(format!("failed to bind {}: {e}", config.authority())))
}

/// Bind and serve until Ctrl+C
pub async fn run(config: ServerConfig) -> CliResult<()> {
    let listener = bind(&config).await?;
    let addr = listener.local_addr()?;
    let app = router(&config);

    print_banner(&config);
    info!(%addr, cors = config.cors, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CliError::server(e.to_string()))
}
