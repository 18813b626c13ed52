// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the embedding adapters and the router.

/// A batch of texts to embed.
#[derive(Debug, Clone)]
pub struct EmbeddingInput {
    pub texts: Vec<String>,
}

impl EmbeddingInput {
    /// Build an input from anything yielding string-like items.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
        }
    }
}

/// A batch of embedding vectors, one per input text, in input order.
#[derive(Debug, Clone)]
pub struct EmbeddingOutput {
    pub embeddings: Vec<Vec<f32>>,
    /// Dimensionality of every vector in `embeddings`.
    pub dimensions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_from_texts() {
        let input = EmbeddingInput::from_texts(["bonjour", "salut"]);
        assert_eq!(input.texts, vec!["bonjour", "salut"]);
    }

    #[test]
    fn output_shape() {
        let output = EmbeddingOutput {
            embeddings: vec![vec![0.1, 0.2, 0.3]],
            dimensions: 3,
        };
        assert_eq!(output.embeddings.len(), 1);
        assert_eq!(output.embeddings[0].len(), output.dimensions);
    }
}
