//! RAG Server binary
//!
//! Run with: cargo run -p doc-rag --bin doc-rag-server
//!
//! `DOC_RAG_CONFIG` may point at a TOML file; the inference credential is
//! read from `RAG_API_KEY` (or `GROQ_API_KEY`).

use std::path::PathBuf;

use doc_rag::{config::RagConfig, server::RagServer, RagPipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var_os("DOC_RAG_CONFIG").map(PathBuf::from);
    let config = RagConfig::load(config_path.as_deref())?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - Top k: {}", config.retrieval.top_k);

    let pipeline = RagPipeline::from_config(&config).await?;
    let server = RagServer::new(config, pipeline);

    println!("\nServer starting...");
    println!("  Ask:    POST http://{}/api/ask", server.address());
    println!("  Health: http://{}/health", server.address());

    server.start().await?;

    Ok(())
}
