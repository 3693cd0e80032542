//! ONNX-based embedding generation
//!
//! Runs all-MiniLM-L6-v2 for 384-dimensional sentence embeddings: mean pooling
//! over the attention mask followed by L2 normalization.

use async_trait::async_trait;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tokenizers::Tokenizer;

use super::{l2_normalize, EmbeddingProvider};
use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};

/// ONNX-based text embedder
pub struct OnnxEmbedder {
    inner: Arc<Inner>,
    dimensions: usize,
}

struct Inner {
    /// ONNX Runtime session; inference needs exclusive access
    session: Mutex<Session>,
    /// HuggingFace tokenizer
    tokenizer: Tokenizer,
    dimensions: usize,
    max_length: usize,
    batch_size: usize,
}

impl OnnxEmbedder {
    /// Load the model, downloading it into the cache directory on first use
    pub async fn new(config: &EmbeddingConfig) -> Result<Self> {
        tracing::info!("Initializing ONNX embedder with model: {}", config.model);

        std::fs::create_dir_all(&config.cache_dir).map_err(|e| {
            Error::Config(format!("Failed to create cache directory: {}", e))
        })?;

        let model_dir = config.cache_dir.join(&config.model);
        std::fs::create_dir_all(&model_dir)?;
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            download_asset(&config.model, "onnx/model.onnx", &model_path).await?;
        }

        if !tokenizer_path.exists() {
            download_asset(&config.model, "tokenizer.json", &tokenizer_path).await?;
        }

        let session = Session::builder()
            .map_err(|e| Error::embedding(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::embedding(format!("Failed to set optimization level: {}", e)))?
            .with_intra_threads(4)
            .map_err(|e| Error::embedding(format!("Failed to set threads: {}", e)))?
            .commit_from_file(&model_path)
            .map_err(|e| Error::embedding(format!("Failed to load model: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| Error::embedding(format!("Failed to load tokenizer: {}", e)))?;

        tracing::info!("ONNX embedder initialized successfully");

        Ok(Self {
            inner: Arc::new(Inner {
                session: Mutex::new(session),
                tokenizer,
                dimensions: config.dimensions,
                max_length: config.max_length,
                batch_size: config.batch_size,
            }),
            dimensions: config.dimensions,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OnnxEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        // Inference is CPU-bound, keep it off the async workers
        let inner = Arc::clone(&self.inner);
        let texts = texts.to_vec();
        tokio::task::spawn_blocking(move || inner.embed_all(&texts))
            .await
            .map_err(|e| Error::internal(format!("Task join error: {}", e)))?
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "onnx"
    }
}

impl Inner {
    fn embed_all(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(self.batch_size) {
            let refs: Vec<&str> = batch.iter().map(|s| s.as_str()).collect();
            all_embeddings.extend(self.embed_batch_internal(&refs)?);
        }

        Ok(all_embeddings)
    }

    fn embed_batch_internal(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let batch_size = texts.len();

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| Error::embedding(format!("Tokenization failed: {}", e)))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0)
            .min(self.max_length)
            .max(1);

        let mut input_ids = vec![0i64; batch_size * max_len];
        let mut attention_mask = vec![0i64; batch_size * max_len];
        let mut token_type_ids = vec![0i64; batch_size * max_len];

        for (i, encoding) in encodings.iter().enumerate() {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let types = encoding.get_type_ids();

            for j in 0..ids.len().min(max_len) {
                input_ids[i * max_len + j] = ids[j] as i64;
                attention_mask[i * max_len + j] = mask[j] as i64;
                token_type_ids[i * max_len + j] = types[j] as i64;
            }
        }

        let input_ids_tensor =
            Tensor::from_array((vec![batch_size, max_len], input_ids.into_boxed_slice()))
                .map_err(|e| Error::embedding(format!("Input tensor creation failed: {}", e)))?;

        let attention_mask_tensor = Tensor::from_array((
            vec![batch_size, max_len],
            attention_mask.clone().into_boxed_slice(),
        ))
        .map_err(|e| Error::embedding(format!("Attention mask tensor creation failed: {}", e)))?;

        let token_type_ids_tensor =
            Tensor::from_array((vec![batch_size, max_len], token_type_ids.into_boxed_slice()))
                .map_err(|e| {
                    Error::embedding(format!("Token type tensor creation failed: {}", e))
                })?;

        let inputs = vec![
            ("input_ids", input_ids_tensor.into_dyn()),
            ("attention_mask", attention_mask_tensor.into_dyn()),
            ("token_type_ids", token_type_ids_tensor.into_dyn()),
        ];

        let mut session = self.session.lock();
        let outputs = session
            .run(inputs)
            .map_err(|e| Error::embedding(format!("Inference failed: {}", e)))?;

        // last_hidden_state: [batch, seq, hidden]
        let output_iter: Vec<_> = outputs.iter().collect();
        let output = output_iter
            .iter()
            .find(|(name, _)| *name == "last_hidden_state")
            .or_else(|| output_iter.first())
            .map(|(_, v)| v)
            .ok_or_else(|| Error::embedding("No output tensor"))?;

        let (tensor_shape, tensor_data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::embedding(format!("Failed to extract tensor: {}", e)))?;

        let dims: Vec<usize> = tensor_shape.iter().map(|&d| d as usize).collect();
        let hidden_size = dims.get(2).copied().unwrap_or(self.dimensions);

        Ok(mean_pool(
            tensor_data,
            &attention_mask,
            batch_size,
            max_len,
            hidden_size,
        ))
    }
}

/// Mean-pool token embeddings under the attention mask, then L2-normalize
fn mean_pool(
    hidden: &[f32],
    attention_mask: &[i64],
    batch_size: usize,
    seq_len: usize,
    hidden_size: usize,
) -> Vec<Vec<f32>> {
    let mut embeddings = Vec::with_capacity(batch_size);

    for i in 0..batch_size {
        let mut sum = vec![0.0f32; hidden_size];
        let mut count = 0.0f32;

        for j in 0..seq_len {
            let mask_val = attention_mask[i * seq_len + j] as f32;
            if mask_val > 0.0 {
                for (k, acc) in sum.iter_mut().enumerate() {
                    let idx = i * seq_len * hidden_size + j * hidden_size + k;
                    if let Some(value) = hidden.get(idx) {
                        *acc += value * mask_val;
                    }
                }
                count += mask_val;
            }
        }

        if count > 0.0 {
            for val in &mut sum {
                *val /= count;
            }
        }

        l2_normalize(&mut sum);
        embeddings.push(sum);
    }

    embeddings
}

/// Download one file of a sentence-transformers model from the HuggingFace hub
async fn download_asset(model_name: &str, remote_path: &str, path: &Path) -> Result<()> {
    let url = format!(
        "https://huggingface.co/sentence-transformers/{}/resolve/main/{}",
        model_name, remote_path
    );

    tracing::info!("Downloading {} from: {}", remote_path, url);

    let response = reqwest::get(&url)
        .await
        .map_err(|e| Error::embedding(format!("Failed to download {}: {}", remote_path, e)))?;

    if !response.status().is_success() {
        return Err(Error::embedding(format!(
            "Download of {} failed: HTTP {}",
            remote_path,
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::embedding(format!("Failed to read {} bytes: {}", remote_path, e)))?;

    // Write to a sibling temp file first so an interrupted download is never cached
    let partial = path.with_extension("part");
    std::fs::write(&partial, &bytes)?;
    std::fs::rename(&partial, path)?;

    tracing::info!("Downloaded {} ({} bytes)", remote_path, bytes.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_pool_respects_mask() {
        // batch 1, seq 3, hidden 2; last token is padding
        let hidden = vec![1.0, 0.0, 3.0, 0.0, 100.0, 100.0];
        let mask = vec![1, 1, 0];
        let pooled = mean_pool(&hidden, &mask, 1, 3, 2);

        assert_eq!(pooled.len(), 1);
        // mean = [2, 0] -> normalized [1, 0]
        assert!((pooled[0][0] - 1.0).abs() < 1e-6);
        assert!(pooled[0][1].abs() < 1e-6);
    }

    #[test]
    fn test_mean_pool_batch_order() {
        let hidden = vec![
            0.0, 2.0, // batch 0, token 0
            1.0, 0.0, // batch 1, token 0
        ];
        let mask = vec![1, 1];
        let pooled = mean_pool(&hidden, &mask, 2, 1, 2);

        assert_eq!(pooled[0], vec![0.0, 1.0]);
        assert_eq!(pooled[1], vec![1.0, 0.0]);
    }
}
