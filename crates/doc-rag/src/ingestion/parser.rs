//! PDF and DOCX text extraction

use sha2::{Digest, Sha256};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::FileType;

/// Plain text extracted from a document
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// File type the text came from
    pub file_type: FileType,
    /// Pages (PDF) or paragraphs (DOCX), newline-joined in document order
    pub content: String,
    /// Number of pages or paragraphs
    pub units: usize,
    /// Content hash, for log correlation only
    pub content_hash: String,
}

impl ExtractedText {
    fn from_units(file_type: FileType, units: Vec<String>) -> Self {
        let content = units.join("\n");
        Self {
            file_type,
            content_hash: hash_content(&content),
            units: units.len(),
            content,
        }
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Converts an uploaded document into a single plain-text string
pub struct TextExtractor;

impl TextExtractor {
    /// Extract text from in-memory bytes, dispatching on the filename's extension
    pub fn extract(filename: &str, data: &[u8]) -> Result<ExtractedText> {
        match FileType::from_filename(filename) {
            FileType::Pdf => Self::extract_pdf(filename, data),
            FileType::Docx => Self::extract_docx(filename, data),
            FileType::Unknown(ext) => Err(Error::UnsupportedFormat(ext)),
        }
    }

    /// Extract text from a file on disk
    pub fn extract_file(path: &Path) -> Result<ExtractedText> {
        let filename = path.to_string_lossy();

        // Reject before touching the filesystem
        if let FileType::Unknown(ext) = FileType::from_filename(&filename) {
            return Err(Error::UnsupportedFormat(ext));
        }

        // File handle is closed when `read` returns, before any parsing
        let data = std::fs::read(path)?;
        Self::extract(&filename, &data)
    }

    /// Extract PDF text page by page
    fn extract_pdf(filename: &str, data: &[u8]) -> Result<ExtractedText> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::extraction(filename, e.to_string()))?;

        // BTreeMap keyed by 1-indexed page number, already in page order
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        let mut pages = Vec::with_capacity(page_numbers.len());
        for page_number in page_numbers {
            let text = doc.extract_text(&[page_number]).map_err(|e| {
                Error::extraction(filename, format!("page {}: {}", page_number, e))
            })?;
            pages.push(text.trim_end_matches(['\n', '\r']).to_string());
        }

        tracing::debug!("Extracted {} pages from {}", pages.len(), filename);

        Ok(ExtractedText::from_units(FileType::Pdf, pages))
    }

    /// Extract DOCX text paragraph by paragraph
    fn extract_docx(filename: &str, data: &[u8]) -> Result<ExtractedText> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| Error::extraction(filename, e.to_string()))?;

        let mut paragraphs = Vec::new();

        for child in doc.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(p) => {
                    let mut text = String::new();
                    push_paragraph_text(&mut text, &p.children);
                    paragraphs.push(text);
                }
                docx_rs::DocumentChild::Table(_) => {
                    // Tables are not body paragraphs
                }
                _ => {}
            }
        }

        tracing::debug!("Extracted {} paragraphs from {}", paragraphs.len(), filename);

        Ok(ExtractedText::from_units(FileType::Docx, paragraphs))
    }
}

/// Append the visible text of paragraph content, descending into hyperlinks
fn push_paragraph_text(out: &mut String, children: &[docx_rs::ParagraphChild]) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(out, run),
            docx_rs::ParagraphChild::Hyperlink(link) => push_paragraph_text(out, &link.children),
            _ => {}
        }
    }
}

/// Append the visible text of a run
fn push_run_text(out: &mut String, run: &docx_rs::Run) {
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(t) => out.push_str(&t.text),
            docx_rs::RunChild::Tab(_) => out.push('\t'),
            docx_rs::RunChild::Break(br) if is_line_break(br) => out.push('\n'),
            _ => {}
        }
    }
}

/// Only text-wrapping breaks end a line; page and column breaks add nothing.
///
/// The break type has no public accessor, so it is read from the `Debug` form.
fn is_line_break(br: &docx_rs::Break) -> bool {
    let repr = format!("{:?}", br);
    !(repr.contains("Page") || repr.contains("Column"))
}

/// Hash content for log correlation
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
