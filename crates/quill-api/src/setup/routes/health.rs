//! Health check handlers and response types.

use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub storage: String,
}

/// Health check - process is up and the upload directory is reachable.
pub async fn health_check(state: Arc<AppState>) -> impl IntoResponse {
    let upload_dir = state.media.config().upload_dir();

    let storage = match tokio::fs::metadata(&upload_dir).await {
        Ok(meta) if meta.is_dir() => "healthy".to_string(),
        Ok(_) => "unhealthy: upload path is not a directory".to_string(),
        Err(e) => format!("unhealthy: {}", e),
    };

    let healthy = storage == "healthy";
    if !healthy {
        tracing::warn!(
            upload_dir = %upload_dir.display(),
            storage = %storage,
            "Health check failed"
        );
    }

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthCheckResponse {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            storage,
        }),
    )
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}
