//! Fixed-size, non-overlapping text chunking

use crate::error::{Error, Result};
use crate::types::Chunk;

/// Splits text into consecutive slices of `chunk_size` characters.
///
/// Sizes count Unicode scalar values, so multi-byte text is never cut inside a
/// character. Boundaries ignore words and sentences.
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Chunk size in characters
    chunk_size: usize,
}

impl TextChunker {
    /// Create a new chunker; the size must be positive
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::Config("chunk size must be positive".to_string()));
        }
        Ok(Self { chunk_size })
    }

    /// Configured chunk size in characters
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Split text into chunk strings, left to right
    pub fn split(&self, text: &str) -> Vec<String> {
        self.chunk(text).into_iter().map(|c| c.content).collect()
    }

    /// Split text into indexed chunks, left to right
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut start_byte = 0usize;
        let mut start_char = 0usize;
        let mut count = 0usize;

        for (byte_pos, _) in text.char_indices() {
            if count == self.chunk_size {
                chunks.push(Chunk::new(
                    chunks.len(),
                    start_char,
                    text[start_byte..byte_pos].to_string(),
                ));
                start_byte = byte_pos;
                start_char += count;
                count = 0;
            }
            count += 1;
        }

        // Final chunk, possibly shorter
        if count > 0 {
            chunks.push(Chunk::new(
                chunks.len(),
                start_char,
                text[start_byte..].to_string(),
            ));
        }

        chunks
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self { chunk_size: 500 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(TextChunker::new(0), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_text() {
        let chunker = TextChunker::default();
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn test_1200_chars_into_three_chunks() {
        let text: String = (0..1200).map(|i| (b'a' + (i % 26) as u8) as char).collect();
        let chunks = TextChunker::new(500).unwrap().chunk(&text);

        let lens: Vec<usize> = chunks.iter().map(|c| c.char_len()).collect();
        assert_eq!(lens, vec![500, 500, 200]);
        assert_eq!(
            chunks.iter().map(|c| c.char_start).collect::<Vec<_>>(),
            vec![0, 500, 1000]
        );
        assert_eq!(
            chunks.iter().map(|c| c.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let chunks = TextChunker::new(4).unwrap().split("abcdefgh");
        assert_eq!(chunks, vec!["abcd", "efgh"]);
    }

    #[test]
    fn test_text_shorter_than_chunk() {
        let chunks = TextChunker::new(500).unwrap().split("short");
        assert_eq!(chunks, vec!["short"]);
    }

    #[test]
    fn test_splits_mid_word() {
        let chunks = TextChunker::new(5).unwrap().split("hello world");
        assert_eq!(chunks, vec!["hello", " worl", "d"]);
    }

    #[test]
    fn test_multibyte_characters() {
        let text = "héllo wörld ✓✓✓";
        let chunks = TextChunker::new(3).unwrap().split(text);

        assert_eq!(chunks[0], "hél");
        assert!(chunks.iter().rev().skip(1).all(|c| c.chars().count() == 3));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_concatenation_reproduces_text() {
        let text = "The quick brown fox jumps over the lazy dog.\nSecond line, with ünïcödé.\n";
        for size in 1..=text.chars().count() + 2 {
            let chunker = TextChunker::new(size).unwrap();
            let chunks = chunker.split(text);

            assert_eq!(chunks.concat(), text, "size {}", size);
            let (last, rest) = chunks.split_last().unwrap();
            assert!(rest.iter().all(|c| c.chars().count() == size));
            assert!(!last.is_empty() && last.chars().count() <= size);
            assert_eq!(chunker.split(text), chunks);
        }
    }
}
