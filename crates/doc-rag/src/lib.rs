//! doc-rag: Retrieval-augmented question answering over a single uploaded document
//!
//! A PDF or DOCX is turned into text, split into fixed-size character chunks,
//! embedded, and indexed in a flat L2 index built per request. The chunks
//! nearest to the question are placed in a prompt and sent to a hosted
//! chat-completion model. Nothing persists between requests.

pub mod config;
pub mod embeddings;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod retrieval;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::{RagPipeline, ERROR_MARKER};
pub use types::{
    document::{Chunk, Document, FileType},
    response::{AskResponse, RagAnswer, RetrievedChunk},
};
