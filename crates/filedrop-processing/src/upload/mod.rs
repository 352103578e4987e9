//! Upload ingestion: validate, stream to storage, then register.

mod pipeline;
mod types;

pub use pipeline::IngestionPipeline;
pub use types::{UploadError, UploadRequest};
