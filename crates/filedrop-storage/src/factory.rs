use crate::{LocalStorage, Storage, StorageError, StorageResult};
use filedrop_core::UploadConfig;
use std::sync::Arc;

/// Create the upload destination described by the configuration
pub async fn create_storage(config: &UploadConfig) -> StorageResult<Arc<dyn Storage>> {
    if config.uploads_dir.as_os_str().is_empty() {
        return Err(StorageError::ConfigError(
            "UPLOADS_DIR not configured".to_string(),
        ));
    }

    let storage = LocalStorage::new(config.uploads_dir.clone()).await?;
    Ok(Arc::new(storage))
}
