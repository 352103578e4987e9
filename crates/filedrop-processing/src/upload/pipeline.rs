//! Ingestion pipeline: validate → stream to storage → register.
//!
//! A storage name is only recorded once the storage backend reports the file
//! flushed, synced, and closed. Any failure leaves the registry untouched.

use chrono::Utc;
use std::sync::Arc;

use filedrop_core::{PartialFilePolicy, StoredUpload, UploadConfig};
use filedrop_storage::{Storage, StorageError};

use super::types::{UploadError, UploadRequest};
use crate::registry::UploadRegistry;
use crate::validator::{generate_storage_name, UploadValidator};

/// Streams uploads into storage and records the completed ones.
///
/// Cheap to share behind an `Arc`; concurrent `upload_file` calls write
/// distinct files and only meet at the registry.
pub struct IngestionPipeline {
    storage: Arc<dyn Storage>,
    registry: Arc<UploadRegistry>,
    validator: UploadValidator,
    max_upload_size_bytes: Option<u64>,
    partial_file_policy: PartialFilePolicy,
}

impl IngestionPipeline {
    pub fn new(
        storage: Arc<dyn Storage>,
        registry: Arc<UploadRegistry>,
        config: &UploadConfig,
    ) -> Self {
        Self {
            storage,
            registry,
            validator: UploadValidator::new(config.extension_policy.clone()),
            max_upload_size_bytes: config.max_upload_size_bytes,
            partial_file_policy: config.partial_file_policy,
        }
    }

    pub fn registry(&self) -> &Arc<UploadRegistry> {
        &self.registry
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Snapshot of all completed uploads in the order they finished.
    pub async fn list_uploads(&self) -> Vec<String> {
        self.registry.list().await
    }

    /// Validate, persist, and register one file.
    ///
    /// A rejected filename returns before any storage access.
    pub async fn upload_file(
        &self,
        request: UploadRequest<'_>,
    ) -> Result<StoredUpload, UploadError> {
        let UploadRequest {
            filename,
            mimetype,
            encoding,
            reader,
        } = request;

        let extension = self.validator.validate(&filename).map_err(|e| {
            tracing::debug!(filename = %filename, error = %e, "Upload rejected");
            UploadError::from(e)
        })?;

        let storage_name = generate_storage_name(&extension);

        tracing::debug!(
            filename = %filename,
            storage_name = %storage_name,
            limit_bytes = ?self.max_upload_size_bytes,
            "Streaming upload to storage"
        );

        let size_bytes = match self
            .storage
            .upload_stream(&storage_name, self.max_upload_size_bytes, reader)
            .await
        {
            Ok(size) => size,
            Err(e) => {
                self.handle_partial_file(&storage_name, &e).await;
                return Err(e.into());
            }
        };

        self.registry.append(storage_name.clone()).await;

        let stored = StoredUpload {
            storage_name,
            original_filename: filename,
            mimetype,
            encoding,
            size_bytes,
            completed_at: Utc::now(),
        };

        tracing::info!(
            storage_name = %stored.storage_name,
            filename = %stored.original_filename,
            mimetype = %stored.mimetype,
            size_bytes = stored.size_bytes,
            "Upload stored"
        );

        Ok(stored)
    }

    async fn handle_partial_file(&self, storage_name: &str, error: &StorageError) {
        if !error.leaves_partial_file() {
            tracing::warn!(storage_name = %storage_name, error = %error, "Upload failed");
            return;
        }

        let path = self.storage.base_path().join(storage_name);
        match self.partial_file_policy {
            PartialFilePolicy::Keep => {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "Upload failed, partial file left in place"
                );
            }
            PartialFilePolicy::Remove => match self.storage.delete(storage_name).await {
                Ok(()) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %error,
                        "Upload failed, partial file removed"
                    );
                }
                Err(delete_err) => {
                    tracing::error!(
                        path = %path.display(),
                        error = %error,
                        delete_error = %delete_err,
                        "Upload failed and partial file could not be removed"
                    );
                }
            },
        }
    }
}
