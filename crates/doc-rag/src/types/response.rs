//! Answer types returned by the pipeline and the HTTP surface

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chunk selected by nearest-neighbor search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Chunk position in the document
    pub index: usize,
    /// Squared Euclidean distance to the query vector
    pub distance: f32,
    /// Chunk text
    pub content: String,
}

/// Result of one successful pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagAnswer {
    /// Per-request id, used for log correlation
    pub request_id: Uuid,
    /// Generated answer text
    pub answer: String,
    /// Retrieved chunks, nearest first
    pub sources: Vec<RetrievedChunk>,
    /// Total chunks the document was split into
    pub total_chunks: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Body of `POST /api/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// Answer text, or an error line starting with the error marker
    pub answer: String,
    /// Whether `answer` is a generated reply
    pub success: bool,
}
