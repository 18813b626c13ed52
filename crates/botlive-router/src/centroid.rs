// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weighted centroid construction from example-utterance groups.
//!
//! Each non-empty variation group is embedded and averaged, then the
//! group means are combined into a weighted mean and L2-normalized. The
//! delivery and tracking intents use sharpened weights: their ambiguous
//! examples are excluded outright because they dilute the distinction
//! between the two.

use tracing::debug;

use botlive_core::error::BotliveError;
use botlive_core::traits::TextEmbedder;
use botlive_core::types::EmbeddingInput;
use botlive_core::vector::{l2_normalize, mean};

use crate::corpus::Intent;

/// Per-group contribution weights for one intent's centroid.
///
/// `auxiliary` covers the generic-zone and confirmation groups, which
/// carry supplementary signal without dominating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupWeights {
    pub natural: f32,
    pub noisy: f32,
    pub colloquial: f32,
    pub ambiguous: f32,
    pub auxiliary: f32,
}

impl GroupWeights {
    /// Standard weighting: natural phrasings dominate, ambiguous examples
    /// contribute a sliver.
    pub const STANDARD: GroupWeights = GroupWeights {
        natural: 1.0,
        noisy: 0.9,
        colloquial: 0.9,
        ambiguous: 0.2,
        auxiliary: 0.20,
    };

    /// Sharpened weighting for the delivery/tracking pair: noisy and
    /// colloquial forms weigh more, ambiguous examples are dropped.
    pub const SHARPENED: GroupWeights = GroupWeights {
        natural: 0.8,
        noisy: 1.15,
        colloquial: 1.1,
        ambiguous: 0.0,
        auxiliary: 0.35,
    };

    /// Select the weighting for an intent.
    pub fn for_intent(intent_id: i64, delivery_intent_id: i64, tracking_intent_id: i64) -> Self {
        if intent_id == delivery_intent_id || intent_id == tracking_intent_id {
            Self::SHARPENED
        } else {
            Self::STANDARD
        }
    }
}

/// An intent together with its unit-length centroid vector.
#[derive(Debug, Clone)]
pub struct IntentCentroid {
    pub intent: Intent,
    /// Weighted mean of per-group mean embeddings, L2 norm ≈ 1.
    pub centroid: Vec<f32>,
}

/// Compute the weighted centroid for one intent.
///
/// Returns `Ok(None)` when no group produces a vector (all groups empty
/// or zero-weighted); the caller skips such intents.
pub(crate) fn build_centroid(
    intent: &Intent,
    weights: &GroupWeights,
    embedder: &dyn TextEmbedder,
) -> Result<Option<Vec<f32>>, BotliveError> {
    let groups: [(&[String], f32); 6] = [
        (&intent.variations.natural, weights.natural),
        (&intent.variations.noisy, weights.noisy),
        (&intent.variations.colloquial, weights.colloquial),
        (&intent.variations.ambiguous, weights.ambiguous),
        (&intent.variations.generic_zone, weights.auxiliary),
        (&intent.variations.confirmation, weights.auxiliary),
    ];

    let mut accumulated: Option<Vec<f32>> = None;
    let mut weight_sum = 0.0f32;

    for (examples, weight) in groups {
        if examples.is_empty() || weight <= 0.0 {
            continue;
        }

        let output = embedder.embed(EmbeddingInput {
            texts: examples.to_vec(),
        })?;
        let Some(group_mean) = mean(&output.embeddings) else {
            continue;
        };

        let acc = accumulated.get_or_insert_with(|| vec![0.0f32; group_mean.len()]);
        for (slot, value) in acc.iter_mut().zip(group_mean.iter()) {
            *slot += weight * value;
        }
        weight_sum += weight;
    }

    let Some(mut centroid) = accumulated else {
        debug!(
            intent_id = intent.intent_id,
            intent_name = %intent.intent_name,
            "no variation group produced a vector"
        );
        return Ok(None);
    };

    for slot in &mut centroid {
        *slot /= weight_sum;
    }
    l2_normalize(&mut centroid);

    Ok(Some(centroid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use botlive_core::vector::{cosine_similarity, l2_norm};
    use botlive_test_utils::StubEmbedder;

    use crate::corpus::VariationGroups;

    fn intent_with(variations: VariationGroups) -> Intent {
        Intent {
            intent_id: 1,
            intent_name: "test".to_string(),
            prompt_target: String::new(),
            score: 0,
            boost_interrogatif: false,
            keywords: Vec::new(),
            variations,
        }
    }

    #[test]
    fn weights_select_sharpened_for_the_pair() {
        assert_eq!(GroupWeights::for_intent(6, 6, 7), GroupWeights::SHARPENED);
        assert_eq!(GroupWeights::for_intent(7, 6, 7), GroupWeights::SHARPENED);
        assert_eq!(GroupWeights::for_intent(1, 6, 7), GroupWeights::STANDARD);
    }

    #[test]
    fn centroid_is_unit_length() {
        let embedder = StubEmbedder::new(32);
        let intent = intent_with(VariationGroups {
            natural: vec!["bonjour boutique".into()],
            noisy: vec!["bjr btk".into()],
            colloquial: vec!["on dit quoi".into()],
            ambiguous: vec!["ok".into()],
            generic_zone: vec!["cocody".into()],
            confirmation: vec!["j'ai reçu".into()],
        });

        let centroid = build_centroid(&intent, &GroupWeights::STANDARD, &embedder)
            .unwrap()
            .unwrap();
        assert!((l2_norm(&centroid) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn natural_group_outweighs_noisy_group() {
        let embedder = StubEmbedder::new(32);
        let intent = intent_with(VariationGroups {
            natural: vec!["alpha".into()],
            noisy: vec!["beta".into()],
            ..Default::default()
        });

        let centroid = build_centroid(&intent, &GroupWeights::STANDARD, &embedder)
            .unwrap()
            .unwrap();

        let alpha = embedder.embed_one("alpha").unwrap();
        let beta = embedder.embed_one("beta").unwrap();
        // natural weight 1.0 > noisy weight 0.9
        assert!(cosine_similarity(&centroid, &alpha) > cosine_similarity(&centroid, &beta));
    }

    #[test]
    fn sharpened_weights_exclude_ambiguous_examples() {
        let embedder = StubEmbedder::new(32);
        let intent = intent_with(VariationGroups {
            natural: vec!["livraison demain".into()],
            ambiguous: vec!["gamma".into()],
            ..Default::default()
        });

        let centroid = build_centroid(&intent, &GroupWeights::SHARPENED, &embedder)
            .unwrap()
            .unwrap();
        let gamma = embedder.embed_one("gamma").unwrap();
        assert!(cosine_similarity(&centroid, &gamma).abs() < f32::EPSILON);
    }

    #[test]
    fn only_ambiguous_examples_under_sharpened_weights_yields_none() {
        let embedder = StubEmbedder::new(32);
        let intent = intent_with(VariationGroups {
            ambiguous: vec!["peut-être".into()],
            ..Default::default()
        });

        let centroid = build_centroid(&intent, &GroupWeights::SHARPENED, &embedder).unwrap();
        assert!(centroid.is_none());
    }

    #[test]
    fn empty_intent_yields_none() {
        let embedder = StubEmbedder::new(32);
        let intent = intent_with(VariationGroups::default());
        let centroid = build_centroid(&intent, &GroupWeights::STANDARD, &embedder).unwrap();
        assert!(centroid.is_none());
    }
}
