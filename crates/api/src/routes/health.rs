//! Liveness and readiness report for the gallery service.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the metadata store answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub storage_profile: &'static str,
    pub db_healthy: bool,
    /// Whether the upload directory exists. A missing directory is created
    /// by the next upload, so it does not degrade the status.
    pub upload_dir_ready: bool,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = state.store.health_check().await.is_ok();
    let upload_dir_ready = tokio::fs::metadata(&state.config.upload_dir)
        .await
        .is_ok_and(|meta| meta.is_dir());

    if !db_healthy {
        tracing::warn!("Health check: metadata store unreachable");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        storage_profile: state.config.storage_profile.as_str(),
        db_healthy,
        upload_dir_ready,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
