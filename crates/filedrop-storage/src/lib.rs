//! Filedrop Storage Library
//!
//! Destination abstraction for the upload pipeline. The only backend is the
//! local filesystem: a flat directory holding one file per stored upload.
//!
//! Storage names are single path components (`<uuid><extension>`). Names that
//! contain a separator or `..` are rejected before any filesystem access.

pub mod factory;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, UploadReader};
