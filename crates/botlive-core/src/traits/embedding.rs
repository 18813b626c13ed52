// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding backend trait for sentence-embedding generation.

use crate::error::BotliveError;
use crate::types::{EmbeddingInput, EmbeddingOutput};

/// Produces fixed-dimension sentence embeddings for natural-language text.
///
/// The call is synchronous: the intended backends run local CPU inference,
/// so there is no async boundary to cross. Implementations must be safe to
/// share across threads; the router calls `embed` concurrently from
/// multiple request handlers.
///
/// Embeddings are assumed deterministic for a given model version. The
/// model name keys the on-disk centroid cache, so two backends returning
/// different vectors must report different names.
pub trait TextEmbedder: Send + Sync {
    /// Identifier of the underlying model, e.g.
    /// `"paraphrase-multilingual-MiniLM-L12-v2"`.
    fn model_name(&self) -> &str;

    /// Output vector dimensionality.
    fn dimensions(&self) -> usize;

    /// Embed a batch of texts, returning one vector per text in order.
    fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, BotliveError>;

    /// Embed a single text.
    fn embed_one(&self, text: &str) -> Result<Vec<f32>, BotliveError> {
        let output = self.embed(EmbeddingInput {
            texts: vec![text.to_string()],
        })?;
        output.embeddings.into_iter().next().ok_or_else(|| BotliveError::Embedding {
            message: "embedding backend returned no vectors".to_string(),
            source: None,
        })
    }
}
