// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ONNX embedding backend using the multilingual MiniLM sentence-transformer.
//!
//! Produces 384-dimensional L2-normalized embeddings on CPU with zero
//! external API calls. French and Nouchi customer messages embed into the
//! same space as the labeled corpus, which is what the centroid router
//! relies on.

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::TensorRef;

use botlive_core::error::BotliveError;
use botlive_core::traits::TextEmbedder;
use botlive_core::types::{EmbeddingInput, EmbeddingOutput};
use botlive_core::vector::l2_normalize;

/// Model identifier reported to callers and used for cache keying.
pub const MODEL_NAME: &str = "paraphrase-multilingual-MiniLM-L12-v2";

/// Embedding dimensions for the multilingual MiniLM model.
pub const EMBEDDING_DIM: usize = 384;

/// ONNX-based sentence embedder.
///
/// Loads the quantized INT8 ONNX model and tokenizer from disk. All
/// inference runs on CPU with a single intra-op thread (tuned for the
/// small VPS instances Botlive deploys on).
pub struct MiniLmEmbedder {
    /// ONNX Runtime session (not Send, wrapped in Mutex for safety).
    session: Mutex<Session>,
    /// HuggingFace tokenizer.
    tokenizer: tokenizers::Tokenizer,
}

// Safety: Session is accessed through Mutex which provides synchronization.
// The tokenizer is thread-safe for encoding operations.
unsafe impl Send for MiniLmEmbedder {}
unsafe impl Sync for MiniLmEmbedder {}

fn backend_error(message: impl Into<String>) -> BotliveError {
    BotliveError::Embedding {
        message: message.into(),
        source: None,
    }
}

impl MiniLmEmbedder {
    /// Creates an embedder from model files on disk.
    ///
    /// Expects `tokenizer.json` next to the provided ONNX model file.
    /// Fails with [`BotliveError::Embedding`] when either file is missing
    /// or unreadable, which construction of the router treats as fatal.
    pub fn new(model_path: &Path) -> Result<Self, BotliveError> {
        let model_dir = model_path
            .parent()
            .ok_or_else(|| backend_error("invalid model path"))?;

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = tokenizers::Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            backend_error(format!(
                "failed to load tokenizer from {}: {e}",
                tokenizer_path.display()
            ))
        })?;

        let session = Session::builder()
            .map_err(|e| backend_error(format!("failed to create ONNX session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| backend_error(format!("failed to set optimization level: {e}")))?
            .with_intra_threads(1)
            .map_err(|e| backend_error(format!("failed to set thread count: {e}")))?
            .commit_from_file(model_path)
            .map_err(|e| {
                backend_error(format!(
                    "failed to load ONNX model from {}: {e}",
                    model_path.display()
                ))
            })?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }

    /// Embed a single text string into a 384-dim unit vector.
    pub fn embed_text(&self, text: &str) -> Result<Vec<f32>, BotliveError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| backend_error(format!("tokenization failed: {e}")))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> =
            encoding.get_type_ids().iter().map(|&t| t as i64).collect();

        let seq_len = input_ids.len();

        let input_ids_array = Array2::from_shape_vec((1, seq_len), input_ids)
            .map_err(|e| backend_error(format!("failed to shape input_ids tensor: {e}")))?;
        let attention_mask_array = Array2::from_shape_vec((1, seq_len), attention_mask.clone())
            .map_err(|e| backend_error(format!("failed to shape attention_mask tensor: {e}")))?;
        let token_type_ids_array = Array2::from_shape_vec((1, seq_len), token_type_ids)
            .map_err(|e| backend_error(format!("failed to shape token_type_ids tensor: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| backend_error(format!("failed to lock ONNX session: {e}")))?;

        let input_ids_tensor = TensorRef::from_array_view(&input_ids_array)
            .map_err(|e| backend_error(format!("failed to create input_ids tensor: {e}")))?;
        let attention_mask_tensor = TensorRef::from_array_view(&attention_mask_array)
            .map_err(|e| backend_error(format!("failed to create attention_mask tensor: {e}")))?;
        let token_type_ids_tensor = TensorRef::from_array_view(&token_type_ids_array)
            .map_err(|e| backend_error(format!("failed to create token_type_ids tensor: {e}")))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor
            ])
            .map_err(|e| backend_error(format!("ONNX inference failed: {e}")))?;

        // Token embeddings come back with shape [1, seq_len, hidden].
        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| backend_error(format!("failed to extract output tensor: {e}")))?;

        let hidden_size = shape[shape.len() - 1] as usize;
        let mut pooled = masked_mean_pool(data, &attention_mask, seq_len, hidden_size);
        l2_normalize(&mut pooled);

        Ok(pooled)
    }
}

/// Mean-pool token embeddings over positions with a set attention mask.
fn masked_mean_pool(
    embeddings: &[f32],
    attention_mask: &[i64],
    seq_len: usize,
    hidden_size: usize,
) -> Vec<f32> {
    let mut sum = vec![0.0f32; hidden_size];
    let mut count = 0.0f32;

    for i in 0..seq_len {
        if attention_mask[i] > 0 {
            for j in 0..hidden_size {
                sum[j] += embeddings[i * hidden_size + j];
            }
            count += 1.0;
        }
    }

    if count > 0.0 {
        for val in &mut sum {
            *val /= count;
        }
    }

    sum
}

impl TextEmbedder for MiniLmEmbedder {
    fn model_name(&self) -> &str {
        MODEL_NAME
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIM
    }

    fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, BotliveError> {
        let mut embeddings = Vec::with_capacity(input.texts.len());

        for text in &input.texts {
            embeddings.push(self.embed_text(text)?);
        }

        Ok(EmbeddingOutput {
            embeddings,
            dimensions: EMBEDDING_DIM,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botlive_core::vector::l2_norm;

    #[test]
    fn masked_pool_skips_padding() {
        // 2 tokens, hidden_size=3, first token masked out (padding)
        let embeddings = vec![
            9.0, 9.0, 9.0, // token 0 (padding)
            1.0, 2.0, 3.0, // token 1 (real)
        ];
        let attention_mask = vec![0, 1];
        let result = masked_mean_pool(&embeddings, &attention_mask, 2, 3);
        assert_eq!(result, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn masked_pool_averages_real_tokens() {
        let embeddings = vec![
            1.0, 2.0, // token 0
            3.0, 4.0, // token 1
            5.0, 6.0, // token 2
        ];
        let attention_mask = vec![1, 1, 1];
        let result = masked_mean_pool(&embeddings, &attention_mask, 3, 2);
        assert!((result[0] - 3.0).abs() < f32::EPSILON);
        assert!((result[1] - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn masked_pool_all_padding_yields_zero_vector() {
        let embeddings = vec![1.0, 2.0, 3.0, 4.0];
        let attention_mask = vec![0, 0];
        let result = masked_mean_pool(&embeddings, &attention_mask, 2, 2);
        assert_eq!(result, vec![0.0, 0.0]);
        assert!(l2_norm(&result) < f32::EPSILON);
    }

    // MiniLmEmbedder::new requires actual model files; inference against
    // the downloaded model is exercised separately. The TextEmbedder impl
    // is verified at compile time.
}
