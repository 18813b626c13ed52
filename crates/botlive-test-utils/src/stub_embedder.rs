// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic bag-of-tokens stub embedder.
//!
//! Each distinct token is assigned its own dimension on first sight, so
//! cosine similarity between two texts is exactly their token overlap.
//! An optional synonym table collapses related surface forms ("combien",
//! "prix") onto one dimension, which is enough to emulate semantic
//! closeness in routing tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use botlive_core::error::BotliveError;
use botlive_core::traits::TextEmbedder;
use botlive_core::types::{EmbeddingInput, EmbeddingOutput};
use botlive_core::vector::l2_normalize;

/// A deterministic embedder for tests.
///
/// Vectors are unit-length token-count vectors. Two instances fed the
/// same texts in the same order produce identical vectors, and repeated
/// calls on one instance are always identical, so routing over this
/// embedder is fully reproducible.
pub struct StubEmbedder {
    dimensions: usize,
    /// Surface form -> shared concept token.
    synonyms: HashMap<String, String>,
    /// Token -> assigned dimension, grown on first sight.
    vocab: Mutex<HashMap<String, usize>>,
    /// Number of texts embedded so far (for cache-hit assertions).
    calls: AtomicUsize,
}

impl StubEmbedder {
    /// Create a stub embedder with the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            synonyms: HashMap::new(),
            vocab: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a stub embedder with a synonym table.
    ///
    /// Every `(surface, concept)` pair makes `surface` embed onto the
    /// `concept` dimension.
    pub fn with_synonyms(dimensions: usize, pairs: &[(&str, &str)]) -> Self {
        let mut embedder = Self::new(dimensions);
        embedder.synonyms = pairs
            .iter()
            .map(|(surface, concept)| (surface.to_lowercase(), concept.to_lowercase()))
            .collect();
        embedder
    }

    /// Number of texts embedded so far.
    pub fn embed_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn dimension_for(&self, token: &str) -> usize {
        let mut vocab = self.vocab.lock().expect("stub vocab lock");
        let next = vocab.len();
        // Wrap around when the vocabulary outgrows the dimensionality;
        // tests use small fixtures so this stays collision-free.
        *vocab.entry(token.to_string()).or_insert(next % self.dimensions)
    }

    fn embed_single(&self, text: &str) -> Vec<f32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut vector = vec![0.0f32; self.dimensions];
        for raw_token in text.to_lowercase().split_whitespace() {
            let token = raw_token.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
            if token.is_empty() {
                continue;
            }
            let token = self.synonyms.get(token).map(String::as_str).unwrap_or(token);
            vector[self.dimension_for(token)] += 1.0;
        }
        l2_normalize(&mut vector);
        vector
    }
}

impl TextEmbedder for StubEmbedder {
    fn model_name(&self) -> &str {
        "stub-embedder"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, BotliveError> {
        let embeddings = input
            .texts
            .iter()
            .map(|text| self.embed_single(text))
            .collect();
        Ok(EmbeddingOutput {
            embeddings,
            dimensions: self.dimensions,
        })
    }
}
