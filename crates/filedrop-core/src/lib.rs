//! Filedrop Core Library
//!
//! This crate provides the domain models, error types, configuration, and upload
//! policies shared across all filedrop components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod upload_policy;

// Re-export commonly used types
pub use config::{BaseConfig, Config, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{FileResponse, StoredUpload};
pub use upload_policy::{ExtensionPolicy, PartialFilePolicy};
