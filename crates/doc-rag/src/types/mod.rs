//! Core types for the RAG pipeline

pub mod document;
pub mod response;

pub use document::{Chunk, Document, FileType};
pub use response::{AskResponse, RagAnswer, RetrievedChunk};
