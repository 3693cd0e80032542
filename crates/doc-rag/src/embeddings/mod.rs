//! Text embedding providers
//!
//! The embedder is built once at process start and shared read-only across
//! requests. Chunks and queries must go through the same provider so their
//! vectors are comparable.

mod hashing;
mod onnx_embedder;

pub use hashing::HashingEmbedder;
pub use onnx_embedder::OnnxEmbedder;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{EmbeddingBackend, EmbeddingConfig};
use crate::error::{Error, Result};

/// Trait for generating text embeddings
///
/// Implementations:
/// - `OnnxEmbedder`: sentence-transformers model through ONNX Runtime
/// - `HashingEmbedder`: deterministic token hashing, no model files
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts; output `i` corresponds to input `i`
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding("Empty embedding result"))
    }

    /// Embedding dimensions
    fn dimensions(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Build the configured embedder
pub async fn from_config(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match config.provider {
        EmbeddingBackend::Onnx => Arc::new(OnnxEmbedder::new(config).await?),
        EmbeddingBackend::Hashing => Arc::new(HashingEmbedder::new(config.dimensions)),
    };

    tracing::info!(
        "Embedding provider ready: {} ({} dimensions)",
        provider.name(),
        provider.dimensions()
    );

    Ok(provider)
}

/// Check that `vectors` honors the embedding contract for `expected` inputs
pub fn check_batch(vectors: &[Vec<f32>], expected: usize) -> Result<usize> {
    if vectors.len() != expected {
        return Err(Error::embedding(format!(
            "Expected {} vectors, got {}",
            expected,
            vectors.len()
        )));
    }

    let dimensions = vectors.first().map(|v| v.len()).unwrap_or(0);
    if let Some((i, v)) = vectors
        .iter()
        .enumerate()
        .find(|(_, v)| v.len() != dimensions)
    {
        return Err(Error::embedding(format!(
            "Vector {} has {} dimensions, expected {}",
            i,
            v.len(),
            dimensions
        )));
    }

    Ok(dimensions)
}

/// L2-normalize a vector in place; zero vectors are left untouched
pub(crate) fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_batch() {
        let ok = vec![vec![0.0; 4], vec![1.0; 4]];
        assert_eq!(check_batch(&ok, 2).unwrap(), 4);
        assert_eq!(check_batch(&[], 0).unwrap(), 0);

        assert!(check_batch(&ok, 3).is_err());

        let ragged = vec![vec![0.0; 4], vec![1.0; 3]];
        assert!(matches!(check_batch(&ragged, 2), Err(Error::Embedding(_))));
    }

    #[test]
    fn test_l2_normalize() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        let mut zero = vec![0.0; 3];
        l2_normalize(&mut zero);
        assert_eq!(zero, vec![0.0; 3]);
    }

    #[tokio::test]
    async fn test_from_config_hashing() {
        let config = EmbeddingConfig {
            provider: EmbeddingBackend::Hashing,
            dimensions: 64,
            ..Default::default()
        };
        let provider = from_config(&config).await.unwrap();
        assert_eq!(provider.name(), "hashing");
        assert_eq!(provider.embed("hello").await.unwrap().len(), 64);
    }
}
