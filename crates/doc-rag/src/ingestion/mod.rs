//! Document ingestion: text extraction and chunking

mod chunker;
mod parser;

#[cfg(test)]
pub(crate) use parser::fixtures;

pub use chunker::TextChunker;
pub use parser::{ExtractedText, TextExtractor};
