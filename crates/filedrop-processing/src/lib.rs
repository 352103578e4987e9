//! Filedrop Processing Library
//!
//! The upload ingestion path: extension validation and storage naming, the
//! in-memory upload registry, and the pipeline that streams a request body to
//! storage before recording it.

pub mod registry;
pub mod upload;
pub mod validator;

pub use registry::UploadRegistry;
pub use upload::{IngestionPipeline, UploadError, UploadRequest};
pub use validator::{extract_extension, generate_storage_name, UploadValidator, ValidationError};
