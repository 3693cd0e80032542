//! Prompt templates for RAG generation

use crate::types::RetrievedChunk;

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved chunk texts, nearest first, one per line
    pub fn build_context(chunks: &[RetrievedChunk]) -> String {
        chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the full RAG prompt
    pub fn build_rag_prompt(question: &str, context: &str) -> String {
        format!(
            "Answer the question using the following context:\n\n{context}\n\nQuestion: {question}",
            context = context,
            question = question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retrieved(index: usize, content: &str) -> RetrievedChunk {
        RetrievedChunk {
            index,
            distance: index as f32,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_build_context_keeps_retrieval_order() {
        let chunks = vec![retrieved(2, "third"), retrieved(0, "first")];
        assert_eq!(PromptBuilder::build_context(&chunks), "third\nfirst");
        assert_eq!(PromptBuilder::build_context(&[]), "");
    }

    #[test]
    fn test_build_rag_prompt() {
        let prompt = PromptBuilder::build_rag_prompt("What is Rust?", "Rust is a language.");
        assert_eq!(
            prompt,
            "Answer the question using the following context:\n\nRust is a language.\n\nQuestion: What is Rust?"
        );
    }
}
