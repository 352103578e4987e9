//! Shared constants.

/// Extensions accepted by the strict (default) upload policy.
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

/// Default maximum accepted payload size (10 MiB).
pub const DEFAULT_MAX_UPLOAD_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Transfer encoding reported when the multipart part does not declare one.
pub const DEFAULT_TRANSFER_ENCODING: &str = "7bit";

/// MIME type reported when the multipart part does not declare one.
pub const DEFAULT_MIMETYPE: &str = "application/octet-stream";

/// Multipart field that carries the uploaded file.
pub const UPLOAD_FIELD_NAME: &str = "file";
