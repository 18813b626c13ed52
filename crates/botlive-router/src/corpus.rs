// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Labeled intent corpus loading and legacy schema normalization.
//!
//! The corpus is a JSON file with an `intents` array. Older corpus
//! exports use legacy field names (`prompt_cible`, `score_hierarchie`,
//! `variations_ambiguës`); aliases are mapped into one canonical schema
//! here, at load time, so the routing algorithms never see them.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use botlive_core::error::BotliveError;

/// The six example-utterance groups contributing to an intent's centroid.
#[derive(Debug, Clone, Default)]
pub struct VariationGroups {
    /// Well-formed French phrasings.
    pub natural: Vec<String>,
    /// Typo'd / SMS-style phrasings.
    pub noisy: Vec<String>,
    /// Nouchi / colloquial phrasings.
    pub colloquial: Vec<String>,
    /// Phrasings that overlap with other intents.
    pub ambiguous: Vec<String>,
    /// Zone mentions without explicit delivery wording.
    pub generic_zone: Vec<String>,
    /// Delivery-confirmation phrases.
    pub confirmation: Vec<String>,
}

impl VariationGroups {
    /// True when no group holds a single example.
    pub fn is_empty(&self) -> bool {
        self.natural.is_empty()
            && self.noisy.is_empty()
            && self.colloquial.is_empty()
            && self.ambiguous.is_empty()
            && self.generic_zone.is_empty()
            && self.confirmation.is_empty()
    }

    /// Total example count across all groups.
    pub fn total_examples(&self) -> usize {
        self.natural.len()
            + self.noisy.len()
            + self.colloquial.len()
            + self.ambiguous.len()
            + self.generic_zone.len()
            + self.confirmation.len()
    }
}

/// A labeled intent, normalized to the canonical schema.
#[derive(Debug, Clone)]
pub struct Intent {
    /// Unique corpus key.
    pub intent_id: i64,
    /// Human-readable label.
    pub intent_name: String,
    /// Opaque identifier of the downstream prompt/behavior this intent
    /// selects; not interpreted by the router.
    pub prompt_target: String,
    /// Priority metadata, passed through untouched.
    pub score: i64,
    /// When true, similarity is boosted for interrogative messages.
    pub boost_interrogatif: bool,
    /// Lowercase trigger words for lexical boosting.
    pub keywords: Vec<String>,
    /// Example utterances grouped by register.
    pub variations: VariationGroups,
}

/// The full labeled corpus, in file order.
#[derive(Debug, Clone)]
pub struct IntentCorpus {
    pub intents: Vec<Intent>,
}

impl IntentCorpus {
    /// Load and normalize a corpus from a JSON file.
    ///
    /// A missing or unparseable file is fatal: the router cannot start
    /// without its corpus.
    pub fn load(path: &Path) -> Result<Self, BotliveError> {
        let raw = std::fs::read_to_string(path).map_err(|e| BotliveError::Corpus {
            message: format!("failed to read corpus file {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        Self::from_json(&raw)
    }

    /// Parse and normalize a corpus from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, BotliveError> {
        let raw: RawCorpus = serde_json::from_str(json).map_err(|e| BotliveError::Corpus {
            message: "failed to parse corpus JSON".to_string(),
            source: Some(Box::new(e)),
        })?;

        let intents: Vec<Intent> = raw.intents.into_iter().map(Intent::from).collect();
        debug!(intent_count = intents.len(), "corpus loaded");

        Ok(Self { intents })
    }

    /// Look up an intent by id.
    pub fn get(&self, intent_id: i64) -> Option<&Intent> {
        self.intents.iter().find(|i| i.intent_id == intent_id)
    }
}

/// Raw JSON shape of the corpus, accepting legacy aliases.
#[derive(Debug, Deserialize)]
struct RawCorpus {
    intents: Vec<RawIntent>,
}

#[derive(Debug, Deserialize)]
struct RawIntent {
    id: i64,
    name: String,
    #[serde(default, alias = "prompt_cible")]
    prompt_target: Option<String>,
    #[serde(default, alias = "score_hierarchie")]
    score: Option<i64>,
    #[serde(default)]
    boost_interrogatif: bool,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    variations_naturelles: Vec<String>,
    #[serde(default)]
    variations_bruitees: Vec<String>,
    #[serde(default)]
    variations_nouchi: Vec<String>,
    #[serde(default, alias = "variations_ambiguës")]
    variations_ambiguees: Vec<String>,
    #[serde(default)]
    variations_zones_generiques: Vec<String>,
    #[serde(default)]
    variations_confirmation_reception: Vec<String>,
}

impl From<RawIntent> for Intent {
    fn from(raw: RawIntent) -> Self {
        Self {
            intent_id: raw.id,
            intent_name: raw.name,
            prompt_target: raw.prompt_target.unwrap_or_default(),
            score: raw.score.unwrap_or(0),
            boost_interrogatif: raw.boost_interrogatif,
            keywords: raw.keywords.iter().map(|k| k.to_lowercase()).collect(),
            variations: VariationGroups {
                natural: raw.variations_naturelles,
                noisy: raw.variations_bruitees,
                colloquial: raw.variations_nouchi,
                ambiguous: raw.variations_ambiguees,
                generic_zone: raw.variations_zones_generiques,
                confirmation: raw.variations_confirmation_reception,
            },
        }
    }
}
