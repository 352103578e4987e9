//! Application state shared by all handlers.

use filedrop_core::Config;
use filedrop_processing::IngestionPipeline;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: Arc<IngestionPipeline>,
}

impl AppState {
    pub fn new(config: Config, pipeline: IngestionPipeline) -> Self {
        Self {
            config,
            pipeline: Arc::new(pipeline),
        }
    }
}
