//! HTTP trigger and status endpoints.

use crate::RunMetrics;
use axum::{
    Router,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{any, get},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use vasari_core::RunReport;
use vasari_sequencer::{RunAborted, RunTrigger};

/// Trigger path used when none is configured.
pub const DEFAULT_TRIGGER_PATH: &str = "/api/cron";

/// Shared state for the HTTP surface.
#[derive(Clone)]
pub struct TriggerState {
    trigger: Arc<dyn RunTrigger>,
    metrics: RunMetrics,
}

impl TriggerState {
    /// Creates state over a trigger and a metrics collector.
    pub fn new(trigger: Arc<dyn RunTrigger>, metrics: RunMetrics) -> Self {
        Self { trigger, metrics }
    }

    /// Metrics updated by every run.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

/// Creates the router: the trigger at `trigger_path`, plus `/health` and
/// `/metrics`.
pub fn create_router(state: TriggerState, trigger_path: &str) -> Router {
    Router::new()
        .route(trigger_path, any(trigger_run))
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

/// Executes one run and records its outcome.
#[instrument(skip_all)]
pub async fn run_and_record(
    trigger: &dyn RunTrigger,
    metrics: &RunMetrics,
) -> Result<RunReport, RunAborted> {
    let outcome = trigger.trigger().await;
    metrics.record(&outcome);
    outcome
}

/// Runs once on GET or POST; any other method is refused.
async fn trigger_run(State(state): State<TriggerState>, method: Method) -> Response {
    if method != Method::GET && method != Method::POST {
        warn!(method = %method, "Rejected trigger request");
        return (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
    }

    info!(method = %method, "Run triggered over HTTP");
    match run_and_record(state.trigger.as_ref(), &state.metrics).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(aborted) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": aborted.source.to_string() })),
        )
            .into_response(),
    }
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Get current metrics snapshot.
async fn get_metrics(State(state): State<TriggerState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.metrics.snapshot()))
}
