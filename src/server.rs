//! HTTP front-end
//!
//! `POST /api/process-url` validates the submitted URL, runs the pipeline and
//! wraps the outcome in the `{ success, data?, error? }` envelope. Failures
//! never carry partial data.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::ResolveError;
use crate::http_client::PageFetcher;
use crate::pipeline::{validate_url, PipelineResult, Resolver};

pub const PROCESS_URL_PATH: &str = "/api/process-url";
pub const HEALTH_PATH: &str = "/health";

/// Response envelope shared by every API route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn bad(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProcessUrlRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Build the API router around a shared resolver.
pub fn router<F>(resolver: Arc<Resolver<F>>) -> Router
where
    F: PageFetcher + 'static,
{
    Router::new()
        .route(PROCESS_URL_PATH, post(process_url::<F>))
        .route(HEALTH_PATH, get(health))
        .with_state(resolver)
}

async fn health() -> &'static str {
    "ok"
}

/// POST /api/process-url
async fn process_url<F>(
    State(resolver): State<Arc<Resolver<F>>>,
    payload: std::result::Result<Json<ProcessUrlRequest>, JsonRejection>,
) -> Response
where
    F: PageFetcher + 'static,
{
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected request body");
            return bad("Invalid request body");
        }
    };

    let url = match request.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => return bad("URL is required"),
    };

    if validate_url(&url).is_err() {
        return bad("Invalid URL format");
    }

    match resolver.resolve(&url).await {
        Ok(result) => (StatusCode::OK, Json(ApiResponse::ok(result))).into_response(),
        Err(err) => {
            warn!(stage = %err.stage(), error = %err, "Processing failed");
            bad(failure_message(&err))
        }
    }
}

fn failure_message(err: &ResolveError) -> String {
    match err {
        ResolveError::MalformedInput(_) => "Invalid URL format".to_string(),
        other => other.to_string(),
    }
}

fn bad(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<PipelineResult>::bad(message)),
    )
        .into_response()
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve<F>(addr: &str, resolver: Arc<Resolver<F>>) -> Result<()>
where
    F: PageFetcher + 'static,
{
    let addr: SocketAddr = addr
        .trim()
        .parse()
        .with_context(|| format!("invalid listen address '{addr}'"))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local_addr = listener.local_addr().context("failed to read local address")?;
    info!(%local_addr, "StreamScout listening");

    let app = router(resolver).layer(TraceLayer::new_for_http());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to capture Ctrl+C signal");
        std::future::pending::<()>().await;
    }
}
