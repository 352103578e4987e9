//! Storage setup and initialization

use anyhow::{Context, Result};
use filedrop_core::Config;
use filedrop_storage::{create_storage, Storage};
use std::sync::Arc;

/// Open the uploads directory, creating it when missing.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(path = %config.uploads_dir().display(), "Initializing upload storage...");

    let storage = create_storage(&config.uploads)
        .await
        .with_context(|| {
            format!(
                "Uploads directory {} is not usable",
                config.uploads_dir().display()
            )
        })?;

    tracing::info!(
        path = %storage.base_path().display(),
        "Upload storage initialized successfully"
    );

    Ok(storage)
}
