//! End-to-end RAG pipeline for one (document, question) pair
//!
//! extract → chunk → embed → index → retrieve → prompt → generate.
//! Every stage returns a `Result`; `rag_pipeline` is the only place errors are
//! turned into user-facing text.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::config::RagConfig;
use crate::embeddings::{self, EmbeddingProvider};
use crate::error::{Error, Result};
use crate::generation::{ChatCompletionClient, LlmProvider, PromptBuilder};
use crate::ingestion::{TextChunker, TextExtractor};
use crate::retrieval::FlatL2Index;
use crate::types::{AskResponse, FileType, RagAnswer, RetrievedChunk};

/// Prefix of every failure string returned to the user
pub const ERROR_MARKER: &str = "❌ Error:";

/// Shared, read-only pipeline context.
///
/// Built once at startup; holds the loaded embedder and the inference client
/// so request handlers never touch global state.
pub struct RagPipeline {
    chunker: TextChunker,
    top_k: usize,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
}

impl RagPipeline {
    /// Create a pipeline from explicit providers
    pub fn new(
        config: &RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            chunker: TextChunker::new(config.chunking.chunk_size)?,
            top_k: config.retrieval.top_k,
            embedder,
            llm,
        })
    }

    /// Build the configured embedder and inference client, then the pipeline
    pub async fn from_config(config: &RagConfig) -> Result<Self> {
        let embedder = embeddings::from_config(&config.embeddings).await?;
        let llm: Arc<dyn LlmProvider> = Arc::new(ChatCompletionClient::new(&config.llm)?);

        if config.llm.api_key.is_none() {
            tracing::warn!("No inference API credential configured; every answer will fail");
        }

        Self::new(config, embedder, llm)
    }

    /// Run the pipeline on an in-memory document
    pub async fn answer(&self, filename: &str, data: &[u8], question: &str) -> Result<RagAnswer> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("rag", %request_id, file = %filename);

        self.run(request_id, filename, data, question)
            .instrument(span)
            .await
    }

    /// Run the pipeline on a document on disk
    pub async fn answer_file(&self, path: &Path, question: &str) -> Result<RagAnswer> {
        let filename = path.to_string_lossy().to_string();

        // Unsupported files are never opened
        if let FileType::Unknown(ext) = FileType::from_filename(&filename) {
            return Err(Error::UnsupportedFormat(ext));
        }

        let data = tokio::fs::read(path).await?;
        self.answer(&filename, &data, question).await
    }

    /// Run the pipeline and render the outcome for the HTTP surface.
    ///
    /// Never fails: errors become `"❌ Error: <description>"` with
    /// `success = false`.
    pub async fn ask(&self, filename: &str, data: &[u8], question: &str) -> AskResponse {
        match self.answer(filename, data, question).await {
            Ok(answer) => AskResponse {
                answer: answer.answer,
                success: true,
            },
            Err(e) => {
                tracing::warn!(kind = e.kind(), "RAG pipeline failed: {}", e);
                AskResponse {
                    answer: render_error(&e),
                    success: false,
                }
            }
        }
    }

    /// Run the pipeline and return the answer, or the error line
    pub async fn rag_pipeline(&self, filename: &str, data: &[u8], question: &str) -> String {
        self.ask(filename, data, question).await.answer
    }

    async fn run(
        &self,
        request_id: Uuid,
        filename: &str,
        data: &[u8],
        question: &str,
    ) -> Result<RagAnswer> {
        let start = Instant::now();
        tracing::info!("Question: \"{}\" ({} bytes)", question, data.len());

        let text = TextExtractor::extract(filename, data)?;
        tracing::debug!(
            "Extracted {} characters from {} units (hash {})",
            text.char_len(),
            text.units,
            &text.content_hash[..12]
        );

        let chunks = self.chunker.chunk(&text.content);
        let contents: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        tracing::debug!("Split into {} chunks", chunks.len());

        let vectors = self.embedder.embed_batch(&contents).await?;
        embeddings::check_batch(&vectors, contents.len())?;

        let index = FlatL2Index::build(&vectors)?;

        let query_vector = self.embedder.embed(question).await?;
        if !index.is_empty() && query_vector.len() != index.dimensions() {
            return Err(Error::embedding(format!(
                "Query has {} dimensions, chunks have {}",
                query_vector.len(),
                index.dimensions()
            )));
        }

        let hits = index.search(&query_vector, self.top_k)?;
        let sources: Vec<RetrievedChunk> = hits
            .iter()
            .map(|hit| RetrievedChunk {
                index: hit.index,
                distance: hit.distance,
                content: chunks[hit.index].content.clone(),
            })
            .collect();
        tracing::debug!(
            "Retrieved chunks {:?}",
            sources.iter().map(|s| s.index).collect::<Vec<_>>()
        );

        let context = PromptBuilder::build_context(&sources);
        let prompt = PromptBuilder::build_rag_prompt(question, &context);

        let answer = self.llm.generate(&prompt).await?;

        let processing_time_ms = start.elapsed().as_millis() as u64;
        tracing::info!("Answered in {}ms using {} chunks", processing_time_ms, sources.len());

        Ok(RagAnswer {
            request_id,
            answer,
            sources,
            total_chunks: chunks.len(),
            processing_time_ms,
        })
    }
}

/// Render an error as the user-facing failure line
pub fn render_error(error: &Error) -> String {
    format!("{} {}", ERROR_MARKER, error)
}
