//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use filedrop_core::Config;
use filedrop_processing::{IngestionPipeline, UploadRegistry};
use std::sync::Arc;

/// Initialize tracing, then build the application.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.log_json())?;

    build_app(config).await
}

/// Validate configuration, open the uploads directory, and assemble the router.
///
/// Fails when the configuration is invalid or the uploads directory cannot be
/// created or written.
pub async fn build_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;

    let registry = Arc::new(UploadRegistry::new());
    let pipeline = IngestionPipeline::new(storage, registry, &config.uploads);
    let state = Arc::new(AppState::new(config.clone(), pipeline));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
