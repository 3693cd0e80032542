//! Application state for the RAG server

use std::sync::Arc;

use crate::pipeline::RagPipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<RagPipeline>,
}

impl AppState {
    /// Create new application state
    pub fn new(pipeline: RagPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Get the pipeline
    pub fn pipeline(&self) -> &RagPipeline {
        &self.pipeline
    }
}
