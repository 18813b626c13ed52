// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline accuracy validation over the labeled corpus.
//!
//! Replays every labeled example through the router and aggregates
//! global and per-intent accuracy, plus the most confidently wrong
//! predictions for error analysis. Read-only against the router; one
//! embedding call per utterance, so intended for offline/test-time use,
//! not the request-serving path.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use botlive_core::error::BotliveError;

use crate::corpus::Intent;
use crate::router::{CentroidRouter, TopIntent};

/// Accuracy numbers for one intent.
#[derive(Debug, Clone, Serialize)]
pub struct IntentAccuracy {
    pub intent_name: String,
    pub accuracy: f64,
    pub correct: usize,
    pub total: usize,
}

/// Corpus-replay accuracy report.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub overall_accuracy: f64,
    pub total_samples: usize,
    pub correct_predictions: usize,
    /// Per-intent breakdown, keyed by intent id.
    pub per_intent: BTreeMap<i64, IntentAccuracy>,
}

/// One wrongly-routed labeled example.
#[derive(Debug, Clone)]
pub struct Misclassification {
    pub message: String,
    pub true_intent: String,
    pub predicted_intent: String,
    /// The router's confidence in the wrong prediction.
    pub confidence: f32,
    pub top_k: Vec<TopIntent>,
}

/// Replays the labeled corpus through a router to measure centroid
/// quality.
pub struct IntentValidator<'a> {
    router: &'a CentroidRouter,
}

impl<'a> IntentValidator<'a> {
    pub fn new(router: &'a CentroidRouter) -> Self {
        Self { router }
    }

    /// Replay every labeled example and aggregate accuracy.
    ///
    /// Only the natural, noisy, and colloquial groups carry a usable
    /// label for this pass; ambiguous, generic-zone, and confirmation
    /// examples are deliberately shared across intents and are skipped.
    pub fn validate_on_corpus(&self) -> Result<ValidationReport, BotliveError> {
        let mut total_samples = 0usize;
        let mut correct_predictions = 0usize;
        let mut per_intent = BTreeMap::new();

        for centroid in self.router.centroids() {
            let intent = &centroid.intent;
            let mut correct = 0usize;
            let mut total = 0usize;

            for example in labeled_examples(intent) {
                let result = self.router.route(example)?;
                total += 1;
                if result.intent_id == intent.intent_id {
                    correct += 1;
                }
            }

            total_samples += total;
            correct_predictions += correct;
            per_intent.insert(
                intent.intent_id,
                IntentAccuracy {
                    intent_name: intent.intent_name.clone(),
                    accuracy: ratio(correct, total),
                    correct,
                    total,
                },
            );
        }

        let report = ValidationReport {
            overall_accuracy: ratio(correct_predictions, total_samples),
            total_samples,
            correct_predictions,
            per_intent,
        };

        info!(
            overall_accuracy = report.overall_accuracy,
            total_samples = report.total_samples,
            "corpus validation complete"
        );

        Ok(report)
    }

    /// Collect every misclassification, most confident first.
    ///
    /// The highest-confidence wrong predictions are the most informative
    /// for debugging centroid quality.
    pub fn analyze_errors(&self, top_n: usize) -> Result<Vec<Misclassification>, BotliveError> {
        let mut errors = Vec::new();

        for centroid in self.router.centroids() {
            let intent = &centroid.intent;
            for example in labeled_examples(intent) {
                let result = self.router.route(example)?;
                if result.intent_id != intent.intent_id {
                    errors.push(Misclassification {
                        message: example.to_string(),
                        true_intent: intent.intent_name.clone(),
                        predicted_intent: result.intent_name,
                        confidence: result.confidence,
                        top_k: result.top_k_intents,
                    });
                }
            }
        }

        errors.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        errors.truncate(top_n);

        Ok(errors)
    }
}

/// The labeled examples of one intent used by the accuracy pass.
fn labeled_examples(intent: &Intent) -> impl Iterator<Item = &str> {
    intent
        .variations
        .natural
        .iter()
        .chain(intent.variations.noisy.iter())
        .chain(intent.variations.colloquial.iter())
        .map(String::as_str)
}

fn ratio(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}
