//! Types for the ingestion pipeline.

use filedrop_core::AppError;
use filedrop_storage::{StorageError, UploadReader};

use crate::validator::ValidationError;

/// One incoming file: client metadata plus the body still to be read.
pub struct UploadRequest<'a> {
    pub filename: String,
    pub mimetype: String,
    pub encoding: String,
    pub reader: UploadReader<'a>,
}

impl<'a> UploadRequest<'a> {
    pub fn new(
        filename: impl Into<String>,
        mimetype: impl Into<String>,
        encoding: impl Into<String>,
        reader: UploadReader<'a>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mimetype: mimetype.into(),
            encoding: encoding.into(),
            reader,
        }
    }
}

impl std::fmt::Debug for UploadRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadRequest")
            .field("filename", &self.filename)
            .field("mimetype", &self.mimetype)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

/// Why an upload did not complete
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Unsupported file type: '{extension}'")]
    UnsupportedFileType { extension: String },

    #[error("Payload exceeds the {limit} byte upload limit")]
    PayloadTooLarge { limit: u64 },

    #[error("Destination unavailable: {0}")]
    DestinationUnavailable(String),

    #[error("Stream failed: {0}")]
    StreamFailed(String),
}

impl From<ValidationError> for UploadError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnsupportedFileType { extension } => {
                UploadError::UnsupportedFileType { extension }
            }
        }
    }
}

impl From<StorageError> for UploadError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::PayloadTooLarge { limit } => UploadError::PayloadTooLarge { limit },
            StorageError::StreamFailed(msg) => UploadError::StreamFailed(msg),
            StorageError::InvalidKey(_)
            | StorageError::OpenFailed(_)
            | StorageError::WriteFailed(_)
            | StorageError::ConfigError(_)
            | StorageError::IoError(_) => UploadError::DestinationUnavailable(err.to_string()),
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::UnsupportedFileType { extension } => {
                AppError::UnsupportedFileType { extension }
            }
            UploadError::PayloadTooLarge { limit } => AppError::PayloadTooLarge { limit },
            UploadError::DestinationUnavailable(msg) => AppError::DestinationUnavailable(msg),
            UploadError::StreamFailed(msg) => AppError::StreamFailed(msg),
        }
    }
}
