// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Centroid routing: cosine similarity with interrogative and lexical
//! re-ranking.
//!
//! The router is built once from the labeled corpus and an embedding
//! backend, and is read-only afterwards: `route` takes `&self`, performs
//! no shared-state writes, and is safe to call concurrently.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use botlive_config::{LexiconConfig, RouterConfig};
use botlive_core::error::BotliveError;
use botlive_core::traits::TextEmbedder;
use botlive_core::vector::{cosine_similarity, l2_normalize};

use crate::cache::CentroidCache;
use crate::centroid::{build_centroid, GroupWeights, IntentCentroid};
use crate::corpus::IntentCorpus;
use crate::lexicon::{contains_interrogative, count_trigger_hits, fold_diacritics};

/// Method tag for centroid-similarity classification.
pub const METHOD_SEMANTIC_CENTROID: &str = "semantic_centroid";
/// Method tag for the empty-input fallback path.
pub const METHOD_EMPTY_FALLBACK: &str = "empty_fallback";

/// Per-hit increment and cap for the delivery/tracking trigger boosts.
const TRIGGER_BOOST_PER_HIT: f32 = 0.10;
const TRIGGER_BOOST_CAP: f32 = 0.40;

/// Per-hit increment and cap for the per-intent keyword boost.
const KEYWORD_BOOST_PER_HIT: f32 = 0.03;
const KEYWORD_BOOST_CAP: f32 = 0.15;

/// Deboost applied to one pair member when only the other family of
/// trigger words is present.
const CROSS_DEBOOST: f32 = 0.75;

/// A candidate intent in the ranked `top_k_intents` list.
#[derive(Debug, Clone, PartialEq)]
pub struct TopIntent {
    pub intent_id: i64,
    pub intent_name: String,
    /// Post-boost score.
    pub confidence: f32,
    pub prompt_target: String,
}

/// Outcome of routing one message.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingResult {
    pub intent_id: i64,
    pub intent_name: String,
    pub prompt_target: String,
    pub score: i64,
    /// Raw cosine similarity of the winner, before any boost.
    pub similarity: f32,
    /// Post-boost score that drove the decision.
    pub confidence: f32,
    /// Ranked candidates, descending confidence (rank order only may be
    /// adjusted by the delivery/tracking tie-break).
    pub top_k_intents: Vec<TopIntent>,
    /// True when the top-2 confidence gap falls below the ambiguity
    /// threshold.
    pub is_ambiguous: bool,
    /// Gap between top-1 and top-2 confidence; 1.0 with fewer than two
    /// candidates.
    pub confidence_delta: f32,
    /// True when an interrogative boost fired.
    pub boost_applied: bool,
    /// Classification strategy tag.
    pub method: &'static str,
}

/// One scored intent during routing.
struct Candidate<'a> {
    centroid: &'a IntentCentroid,
    raw: f32,
    boosted: f32,
}

/// Routes free-text customer messages to the closest intent centroid.
pub struct CentroidRouter {
    centroids: BTreeMap<i64, IntentCentroid>,
    embedder: Arc<dyn TextEmbedder>,
    config: RouterConfig,
    lexicon: LexiconConfig,
}

impl std::fmt::Debug for CentroidRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CentroidRouter")
            .field("intent_count", &self.centroids.len())
            .field("model", &self.embedder.model_name())
            .finish_non_exhaustive()
    }
}

impl CentroidRouter {
    /// Build the router from an already-loaded corpus.
    ///
    /// Embeds every intent's variation groups (or loads their centroids
    /// from `cache`), skipping intents that produce no vector. Fails when
    /// the embedding backend is unavailable or when zero centroids
    /// survive.
    pub fn new(
        corpus: IntentCorpus,
        embedder: Arc<dyn TextEmbedder>,
        config: RouterConfig,
        lexicon: LexiconConfig,
        cache: Option<&CentroidCache>,
    ) -> Result<Self, BotliveError> {
        let mut centroids = BTreeMap::new();

        for intent in corpus.intents {
            if intent.variations.is_empty() {
                warn!(
                    intent_id = intent.intent_id,
                    intent_name = %intent.intent_name,
                    "skipping intent with no example utterances"
                );
                continue;
            }

            let cached = cache.and_then(|c| c.get(intent.intent_id, embedder.dimensions()));
            let vector = match cached {
                Some(vector) => vector,
                None => {
                    let weights = GroupWeights::for_intent(
                        intent.intent_id,
                        config.delivery_intent_id,
                        config.tracking_intent_id,
                    );
                    match build_centroid(&intent, &weights, embedder.as_ref())? {
                        Some(vector) => {
                            if let Some(cache) = cache
                                && let Err(e) = cache.put(intent.intent_id, &vector)
                            {
                                warn!(
                                    intent_id = intent.intent_id,
                                    error = %e,
                                    "failed to persist centroid cache entry"
                                );
                            }
                            vector
                        }
                        None => {
                            warn!(
                                intent_id = intent.intent_id,
                                intent_name = %intent.intent_name,
                                "skipping intent with no usable variation groups"
                            );
                            continue;
                        }
                    }
                }
            };

            centroids.insert(
                intent.intent_id,
                IntentCentroid {
                    intent,
                    centroid: vector,
                },
            );
        }

        if centroids.is_empty() {
            return Err(BotliveError::EmptyCentroidMap);
        }

        info!(
            intent_count = centroids.len(),
            model = embedder.model_name(),
            "centroid router ready"
        );

        Ok(Self {
            centroids,
            embedder,
            config,
            lexicon,
        })
    }

    /// Build the router from a corpus JSON file.
    pub fn from_corpus_file(
        path: &Path,
        embedder: Arc<dyn TextEmbedder>,
        config: RouterConfig,
        lexicon: LexiconConfig,
        cache: Option<&CentroidCache>,
    ) -> Result<Self, BotliveError> {
        let corpus = IntentCorpus::load(path)?;
        Self::new(corpus, embedder, config, lexicon, cache)
    }

    /// Registered centroids, ascending intent id.
    pub fn centroids(&self) -> impl Iterator<Item = &IntentCentroid> {
        self.centroids.values()
    }

    /// Number of registered intents.
    pub fn intent_count(&self) -> usize {
        self.centroids.len()
    }

    /// True when the intent survived centroid construction.
    pub fn contains_intent(&self, intent_id: i64) -> bool {
        self.centroids.contains_key(&intent_id)
    }

    /// Route a message with the configured `default_top_k` and boosting on.
    pub fn route(&self, message: &str) -> Result<RoutingResult, BotliveError> {
        self.route_with(message, self.config.default_top_k, true)
    }

    /// Route a message, controlling candidate-list size and the
    /// interrogative boost.
    ///
    /// Total over its input domain: empty and whitespace-only messages
    /// return the fallback intent with zero confidence rather than an
    /// error. The only failure path is the embedding backend itself.
    pub fn route_with(
        &self,
        message: &str,
        top_k: usize,
        apply_boost: bool,
    ) -> Result<RoutingResult, BotliveError> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return self.fallback_result();
        }

        let mut embedding = self.embedder.embed_one(trimmed)?;
        l2_normalize(&mut embedding);

        let mut candidates: Vec<Candidate<'_>> = self
            .centroids
            .values()
            .map(|centroid| {
                let raw = cosine_similarity(&embedding, &centroid.centroid);
                Candidate {
                    centroid,
                    raw,
                    boosted: raw,
                }
            })
            .collect();

        // Interrogative boost: flagged intents gain when the customer is
        // asking a question.
        let mut boost_applied = false;
        if apply_boost && contains_interrogative(trimmed, &self.lexicon.interrogative_markers) {
            for cand in &mut candidates {
                if cand.centroid.intent.boost_interrogatif {
                    cand.boosted =
                        (cand.boosted * self.config.interrogative_boost).min(1.0);
                    boost_applied = true;
                }
            }
        }

        // Lexical boosts run regardless of the interrogative check, on
        // the accent-folded message.
        let folded = fold_diacritics(trimmed);
        let ship_hits = count_trigger_hits(&folded, &self.lexicon.delivery_triggers);
        let track_hits = count_trigger_hits(&folded, &self.lexicon.tracking_triggers);

        for cand in &mut candidates {
            let intent = &cand.centroid.intent;

            if intent.intent_id == self.config.delivery_intent_id {
                if ship_hits > 0 {
                    cand.boosted = (cand.boosted * trigger_factor(ship_hits)).min(1.0);
                }
                if track_hits > 0 && ship_hits == 0 {
                    cand.boosted *= CROSS_DEBOOST;
                }
            } else if intent.intent_id == self.config.tracking_intent_id {
                if track_hits > 0 {
                    cand.boosted = (cand.boosted * trigger_factor(track_hits)).min(1.0);
                }
                if ship_hits > 0 && track_hits == 0 {
                    cand.boosted *= CROSS_DEBOOST;
                }
            }

            let kw_hits = intent
                .keywords
                .iter()
                .map(|k| fold_diacritics(k))
                .filter(|k| !k.is_empty() && folded.contains(k.as_str()))
                .count();
            if kw_hits > 0 {
                let factor =
                    1.0 + (KEYWORD_BOOST_PER_HIT * kw_hits as f32).min(KEYWORD_BOOST_CAP);
                cand.boosted = (cand.boosted * factor).min(1.0);
            }
        }

        // Rank by boosted score; the sort is stable so exact ties keep
        // ascending-id order from the map.
        candidates.sort_by(|a, b| {
            b.boosted
                .partial_cmp(&a.boosted)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut top: Vec<TopIntent> = candidates
            .iter()
            .take(top_k)
            .map(|cand| TopIntent {
                intent_id: cand.centroid.intent.intent_id,
                intent_name: cand.centroid.intent.intent_name.clone(),
                confidence: cand.boosted,
                prompt_target: cand.centroid.intent.prompt_target.clone(),
            })
            .collect();

        let (confidence_delta, is_ambiguous) = if top.len() >= 2 {
            let delta = top[0].confidence - top[1].confidence;
            (delta, delta < self.config.ambiguity_threshold)
        } else {
            (1.0, false)
        };

        // Dedicated delivery/tracking tie-break: when the pair occupies
        // the top-2 within the looser threshold, the family with strictly
        // more trigger hits wins the top rank. Confidences are kept;
        // only the order changes.
        if top.len() >= 2 && confidence_delta < self.config.tie_break_threshold {
            let ids = [top[0].intent_id, top[1].intent_id];
            let is_pair = ids.contains(&self.config.delivery_intent_id)
                && ids.contains(&self.config.tracking_intent_id);
            if is_pair && ship_hits != track_hits {
                let preferred = if ship_hits > track_hits {
                    self.config.delivery_intent_id
                } else {
                    self.config.tracking_intent_id
                };
                if top[0].intent_id != preferred {
                    top.swap(0, 1);
                    debug!(
                        ship_hits,
                        track_hits, "delivery/tracking tie-break reordered top candidates"
                    );
                }
            }
        }

        // Winner: ranked top-1, or the raw best when top_k == 0.
        let (winner_id, winner_confidence) = match top.first() {
            Some(first) => (first.intent_id, first.confidence),
            None => {
                let best = candidates.first().ok_or_else(|| {
                    BotliveError::Internal("router has no centroids".to_string())
                })?;
                (best.centroid.intent.intent_id, best.boosted)
            }
        };

        let winner = candidates
            .iter()
            .find(|c| c.centroid.intent.intent_id == winner_id)
            .ok_or_else(|| {
                BotliveError::Internal("winning intent missing from candidates".to_string())
            })?;
        let intent = &winner.centroid.intent;

        Ok(RoutingResult {
            intent_id: intent.intent_id,
            intent_name: intent.intent_name.clone(),
            prompt_target: intent.prompt_target.clone(),
            score: intent.score,
            similarity: winner.raw,
            confidence: winner_confidence,
            top_k_intents: top,
            is_ambiguous,
            confidence_delta,
            boost_applied,
            method: METHOD_SEMANTIC_CENTROID,
        })
    }

    /// Deterministic result for empty input: the configured fallback
    /// intent when registered, else the lowest intent id.
    fn fallback_result(&self) -> Result<RoutingResult, BotliveError> {
        let centroid = self
            .config
            .fallback_intent_id
            .and_then(|id| self.centroids.get(&id))
            .or_else(|| self.centroids.values().next())
            .ok_or_else(|| BotliveError::Internal("router has no centroids".to_string()))?;
        let intent = &centroid.intent;

        Ok(RoutingResult {
            intent_id: intent.intent_id,
            intent_name: intent.intent_name.clone(),
            prompt_target: intent.prompt_target.clone(),
            score: intent.score,
            similarity: 0.0,
            confidence: 0.0,
            top_k_intents: Vec::new(),
            is_ambiguous: false,
            confidence_delta: 1.0,
            boost_applied: false,
            method: METHOD_EMPTY_FALLBACK,
        })
    }
}

/// Boost factor for `hits` delivery/tracking trigger occurrences:
/// +10% per hit, capped at +40%.
fn trigger_factor(hits: usize) -> f32 {
    1.0 + (TRIGGER_BOOST_PER_HIT * hits as f32).min(TRIGGER_BOOST_CAP)
}
