//! Filedrop API Library
//!
//! HTTP surface of the upload service: the uploads query and mutation, health
//! probe, OpenAPI document, and application setup.

mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;
mod telemetry;
mod utils;

pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
