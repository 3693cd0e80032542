//! Document and chunk types

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported document formats
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document, extracted page by page
    Pdf,
    /// Microsoft Word document (.docx), extracted paragraph by paragraph
    Docx,
    /// Anything else, keeps the offending extension
    Unknown(String),
}

impl FileType {
    /// Detect file type from extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Detect file type from a filename or path
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::from_extension(ext)
    }

    /// Check if this is a supported file type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// An uploaded document, alive for one request only
#[derive(Debug, Clone)]
pub struct Document {
    /// Original filename as uploaded by user
    pub filename: String,
    /// Format derived from the filename
    pub file_type: FileType,
    /// Raw file bytes
    pub data: Vec<u8>,
}

impl Document {
    /// Create a document, deriving its format from the filename
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        let filename = filename.into();
        let file_type = FileType::from_filename(&filename);
        Self {
            filename,
            file_type,
            data,
        }
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A contiguous slice of the extracted text; its position is its identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position in the chunk sequence (0-indexed)
    pub index: usize,
    /// Offset of the first character in the source text, in characters
    pub char_start: usize,
    /// Chunk text
    pub content: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(index: usize, char_start: usize, content: String) -> Self {
        Self {
            index,
            char_start,
            content,
        }
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
