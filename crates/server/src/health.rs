use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use retention_store::MetricsSnapshot;

use crate::api::AppState;

/// Capability flags reported to the UI. The rule-based engine never loads a language model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub langchain_initialized: bool,
    pub vectorstore_ready: bool,
    pub gpt4_enabled: bool,
    pub demo_mode: bool,
    pub timestamp: DateTime<Utc>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        langchain_initialized: false,
        vectorstore_ready: false,
        gpt4_enabled: false,
        demo_mode: true,
        timestamp: Utc::now(),
    })
}

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
