//! Storage abstraction trait

use async_trait::async_trait;
use std::path::Path;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Byte source consumed by [`Storage::upload_stream`].
///
/// The lifetime lets callers hand over readers that borrow request state
/// (a multipart field, for instance).
pub type UploadReader<'a> = Pin<Box<dyn AsyncRead + Send + 'a>>;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage name: {0}")]
    InvalidKey(String),

    /// The destination file could not be created. Nothing was written.
    #[error("Failed to open destination: {0}")]
    OpenFailed(String),

    /// Writing, flushing, or syncing an already created file failed.
    #[error("Failed to write destination: {0}")]
    WriteFailed(String),

    /// The source reader returned an error before end of stream.
    #[error("Source stream failed: {0}")]
    StreamFailed(String),

    #[error("Payload exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StorageError {
    /// Whether the failed operation may have left a partially written file behind.
    pub fn leaves_partial_file(&self) -> bool {
        matches!(
            self,
            StorageError::WriteFailed(_)
                | StorageError::StreamFailed(_)
                | StorageError::PayloadTooLarge { .. }
        )
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The ingestion pipeline talks to the destination only through this trait,
/// so tests can swap in a backend that fails on demand.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stream `reader` into a new file called `storage_name`.
    ///
    /// The reader is consumed until EOF. When `max_bytes` is set and the stream
    /// grows past it, or the reader fails with `ErrorKind::FileTooLarge`,
    /// writing stops and `PayloadTooLarge` is returned. On
    /// success the file has been flushed, synced, and closed, and the number of
    /// bytes written is returned.
    async fn upload_stream<'a>(
        &self,
        storage_name: &str,
        max_bytes: Option<u64>,
        reader: UploadReader<'a>,
    ) -> StorageResult<u64>;

    /// Delete a stored file. Deleting a missing file succeeds.
    async fn delete(&self, storage_name: &str) -> StorageResult<()>;

    async fn exists(&self, storage_name: &str) -> StorageResult<bool>;

    /// Directory that receives stored files
    fn base_path(&self) -> &Path;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_classification() {
        assert!(!StorageError::OpenFailed("denied".to_string()).leaves_partial_file());
        assert!(!StorageError::InvalidKey("../x".to_string()).leaves_partial_file());
        assert!(StorageError::WriteFailed("disk full".to_string()).leaves_partial_file());
        assert!(StorageError::StreamFailed("reset".to_string()).leaves_partial_file());
        assert!(StorageError::PayloadTooLarge { limit: 1 }.leaves_partial_file());
    }
}
