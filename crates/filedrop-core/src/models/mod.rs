//! Data models shared between the pipeline and the HTTP layer

mod upload;

pub use upload::*;
