use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A file that has been fully written, synced, and registered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUpload {
    /// `<uuid v4><extension>`, the file name inside the uploads directory
    pub storage_name: String,
    pub original_filename: String,
    pub mimetype: String,
    pub encoding: String,
    pub size_bytes: u64,
    pub completed_at: DateTime<Utc>,
}

/// Result of the upload mutation, echoing the client-supplied metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct FileResponse {
    /// Original filename as sent by the client
    #[schema(example = "photo.png")]
    pub filename: String,
    #[schema(example = "image/png")]
    pub mimetype: String,
    #[schema(example = "7bit")]
    pub encoding: String,
}

impl From<StoredUpload> for FileResponse {
    fn from(upload: StoredUpload) -> Self {
        Self {
            filename: upload.original_filename,
            mimetype: upload.mimetype,
            encoding: upload.encoding,
        }
    }
}
