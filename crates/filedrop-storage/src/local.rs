use crate::traits::{Storage, StorageError, StorageResult, UploadReader};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Bytes moved per read/write step when streaming an upload to disk.
pub const COPY_WINDOW_BYTES: usize = 64 * 1024;

const PROBE_FILE_NAME: &str = ".filedrop-write-probe";

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at `base_path`.
    ///
    /// The directory is created when missing and proven writable with a probe
    /// file, so a misconfigured destination fails at startup instead of on the
    /// first upload.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        let probe = base_path.join(PROBE_FILE_NAME);
        fs::write(&probe, b"").await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Storage directory {} is not writable: {}",
                base_path.display(),
                e
            ))
        })?;
        if let Err(e) = fs::remove_file(&probe).await {
            tracing::warn!(
                path = %probe.display(),
                error = %e,
                "Failed to remove storage write probe"
            );
        }

        tracing::debug!(path = %base_path.display(), "Local storage ready");

        Ok(LocalStorage { base_path })
    }

    /// Map a storage name to its path, refusing anything that is not a
    /// single plain path component.
    fn name_to_path(&self, storage_name: &str) -> StorageResult<PathBuf> {
        if storage_name.is_empty()
            || storage_name.contains('/')
            || storage_name.contains('\\')
            || storage_name.contains("..")
        {
            return Err(StorageError::InvalidKey(format!(
                "'{}' is not a plain file name",
                storage_name
            )));
        }

        Ok(self.base_path.join(storage_name))
    }
}

/// A source that gave up because an outer body limit was hit reports
/// `FileTooLarge`; with a limit configured that is the client's oversize, not
/// a broken stream.
fn read_error(err: std::io::Error, max_bytes: Option<u64>) -> StorageError {
    match (err.kind(), max_bytes) {
        (std::io::ErrorKind::FileTooLarge, Some(limit)) => StorageError::PayloadTooLarge { limit },
        _ => StorageError::StreamFailed(err.to_string()),
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload_stream<'a>(
        &self,
        storage_name: &str,
        max_bytes: Option<u64>,
        mut reader: UploadReader<'a>,
    ) -> StorageResult<u64> {
        let path = self.name_to_path(storage_name)?;
        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::OpenFailed(format!("Failed to create file {}: {}", path.display(), e))
            })?;

        let mut window = vec![0u8; COPY_WINDOW_BYTES];
        let mut written: u64 = 0;

        loop {
            let n = reader
                .read(&mut window)
                .await
                .map_err(|e| read_error(e, max_bytes))?;
            if n == 0 {
                break;
            }

            let next = written + n as u64;
            if let Some(limit) = max_bytes {
                if next > limit {
                    tracing::warn!(
                        path = %path.display(),
                        limit_bytes = limit,
                        received_bytes = next,
                        "Upload exceeded size limit, stopping write"
                    );
                    return Err(StorageError::PayloadTooLarge { limit });
                }
            }

            file.write_all(&window[..n]).await.map_err(|e| {
                StorageError::WriteFailed(format!(
                    "Failed to write file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            written = next;
        }

        file.flush().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to flush file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        drop(file);

        tracing::info!(
            path = %path.display(),
            size_bytes = written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage stream upload successful"
        );

        Ok(written)
    }

    async fn delete(&self, storage_name: &str) -> StorageResult<()> {
        let path = self.name_to_path(storage_name)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    async fn exists(&self, storage_name: &str) -> StorageResult<bool> {
        let path = self.name_to_path(storage_name)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::io;
    use tempfile::tempdir;
    use tokio_util::io::StreamReader;

    fn reader_from(data: Vec<u8>) -> UploadReader<'static> {
        Box::pin(io::Cursor::new(data))
    }

    fn failing_reader(prefix: &'static [u8], kind: io::ErrorKind) -> UploadReader<'static> {
        let chunks = vec![Ok(Bytes::from_static(prefix)), Err(io::Error::new(kind, "source failed"))];
        Box::pin(StreamReader::new(futures::stream::iter(chunks)))
    }

    #[tokio::test]
    async fn test_new_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("uploads");

        let storage = LocalStorage::new(&nested).await.unwrap();

        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
        assert!(!nested.join(PROBE_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_new_fails_when_path_is_a_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("not-a-dir");
        std::fs::write(&file_path, b"x").unwrap();

        let result = LocalStorage::new(&file_path).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_stream_upload_multi_window_round_trip() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let data: Vec<u8> = (0..(COPY_WINDOW_BYTES * 3 + 17))
            .map(|i| (i % 251) as u8)
            .collect();

        let written = storage
            .upload_stream("big.bin", None, reader_from(data.clone()))
            .await
            .unwrap();

        assert_eq!(written, data.len() as u64);
        assert_eq!(std::fs::read(dir.path().join("big.bin")).unwrap(), data);
    }

    #[tokio::test]
    async fn test_stream_upload_empty_payload() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let written = storage
            .upload_stream("empty.png", Some(10), reader_from(Vec::new()))
            .await
            .unwrap();

        assert_eq!(written, 0);
        assert!(storage.exists("empty.png").await.unwrap());
        assert!(std::fs::read(dir.path().join("empty.png")).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stream_upload_limit_boundary() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let written = storage
            .upload_stream("exact.bin", Some(8), reader_from(vec![1; 8]))
            .await
            .unwrap();
        assert_eq!(written, 8);

        let result = storage
            .upload_stream("over.bin", Some(8), reader_from(vec![1; 9]))
            .await;
        assert!(matches!(
            result,
            Err(StorageError::PayloadTooLarge { limit: 8 })
        ));
    }

    #[tokio::test]
    async fn test_stream_upload_source_failure() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage
            .upload_stream(
                "broken.png",
                None,
                failing_reader(b"partial", io::ErrorKind::ConnectionReset),
            )
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, StorageError::StreamFailed(_)));
        assert!(err.leaves_partial_file());
    }

    #[tokio::test]
    async fn test_stream_upload_outer_body_limit() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let limited = storage
            .upload_stream(
                "cut.png",
                Some(1024),
                failing_reader(b"partial", io::ErrorKind::FileTooLarge),
            )
            .await
            .unwrap_err();
        assert!(matches!(limited, StorageError::PayloadTooLarge { limit: 1024 }));
        assert!(limited.leaves_partial_file());

        let unlimited = storage
            .upload_stream(
                "cut.gif",
                None,
                failing_reader(b"partial", io::ErrorKind::FileTooLarge),
            )
            .await
            .unwrap_err();
        assert!(matches!(unlimited, StorageError::StreamFailed(_)));
    }

    #[tokio::test]
    async fn test_stream_upload_never_overwrites() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage
            .upload_stream("taken.png", None, reader_from(b"first".to_vec()))
            .await
            .unwrap();

        let result = storage
            .upload_stream("taken.png", None, reader_from(b"second".to_vec()))
            .await;

        assert!(matches!(result, Err(StorageError::OpenFailed(_))));
        assert_eq!(std::fs::read(dir.path().join("taken.png")).unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage
            .upload_stream("../escape.png", None, reader_from(b"x".to_vec()))
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("nested/file.png").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("..\\file.png").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage
            .upload_stream("gone.gif", None, reader_from(b"gif".to_vec()))
            .await
            .unwrap();

        storage.delete("gone.gif").await.unwrap();
        assert!(!storage.exists("gone.gif").await.unwrap());
        assert!(storage.delete("gone.gif").await.is_ok());
    }
}
