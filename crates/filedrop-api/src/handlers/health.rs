//! Health check handler

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheckResponse {
    pub status: String,
    pub storage: String,
    /// Uploads recorded since startup
    pub uploads: usize,
}

/// Report whether the uploads directory is still reachable.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service healthy", body = HealthCheckResponse),
        (status = 503, description = "Uploads directory unavailable", body = HealthCheckResponse)
    )
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthCheckResponse>) {
    let base_path = state.pipeline.storage().base_path().to_path_buf();

    let storage = match tokio::time::timeout(CHECK_TIMEOUT, tokio::fs::metadata(&base_path)).await
    {
        Ok(Ok(meta)) if meta.is_dir() => "healthy".to_string(),
        Ok(Ok(_)) => "unavailable: not a directory".to_string(),
        Ok(Err(e)) => {
            tracing::error!(path = %base_path.display(), error = %e, "Storage health check failed");
            format!("unavailable: {}", e.kind())
        }
        Err(_) => "timeout".to_string(),
    };

    let healthy = storage == "healthy";
    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        storage,
        uploads: state.pipeline.registry().len().await,
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
