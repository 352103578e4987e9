//! API constants

/// Path of the uploads collection (query and mutation)
pub const UPLOADS_PATH: &str = "/api/v0/uploads";

/// Headroom above the upload limit for multipart framing, so oversized files
/// are reported by the pipeline rather than cut off by the body limit layer.
pub const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;
