// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Botlive routing subsystem.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Botlive configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to the
/// production tuning.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotliveConfig {
    /// Agent identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Embedding model settings.
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Centroid router settings.
    #[serde(default)]
    pub router: RouterConfig,

    /// French lexical heuristics used by the router.
    #[serde(default)]
    pub lexicon: LexiconConfig,
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "botlive".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Embedding model configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingConfig {
    /// Name of the sentence-embedding model. Keys the centroid disk cache,
    /// so changing the model invalidates cached centroids.
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Directory for model files and the centroid cache.
    /// `None` resolves under the XDG data directory.
    #[serde(default)]
    pub data_dir: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            data_dir: None,
        }
    }
}

fn default_model_name() -> String {
    "paraphrase-multilingual-MiniLM-L12-v2".to_string()
}

/// Centroid router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Path to the labeled intent corpus JSON file.
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,

    /// Number of candidates returned in `top_k_intents`.
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Confidence gap between top-1 and top-2 below which the routing
    /// outcome is flagged ambiguous.
    #[serde(default = "default_ambiguity_threshold")]
    pub ambiguity_threshold: f32,

    /// Looser gap under which the delivery/tracking tie-break may reorder
    /// the top-2 candidates.
    #[serde(default = "default_tie_break_threshold")]
    pub tie_break_threshold: f32,

    /// Multiplier applied to `boost_interrogatif` intents when the message
    /// contains an interrogative marker.
    #[serde(default = "default_interrogative_boost")]
    pub interrogative_boost: f32,

    /// Intent returned for empty/whitespace-only messages. `None` falls
    /// back to the lowest intent id in the map.
    #[serde(default)]
    pub fallback_intent_id: Option<i64>,

    /// Intent id carrying delivery semantics (sharpened centroid weights,
    /// delivery-trigger boosting, tie-break participant).
    #[serde(default = "default_delivery_intent_id")]
    pub delivery_intent_id: i64,

    /// Intent id carrying order-tracking semantics (sharpened centroid
    /// weights, tracking-trigger boosting, tie-break participant).
    #[serde(default = "default_tracking_intent_id")]
    pub tracking_intent_id: i64,

    /// Enable the on-disk centroid cache.
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,

    /// Directory for cached centroid vectors. `None` resolves under the
    /// embedding data directory.
    #[serde(default)]
    pub cache_dir: Option<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            default_top_k: default_top_k(),
            ambiguity_threshold: default_ambiguity_threshold(),
            tie_break_threshold: default_tie_break_threshold(),
            interrogative_boost: default_interrogative_boost(),
            fallback_intent_id: None,
            delivery_intent_id: default_delivery_intent_id(),
            tracking_intent_id: default_tracking_intent_id(),
            cache_enabled: default_cache_enabled(),
            cache_dir: None,
        }
    }
}

fn default_corpus_path() -> String {
    "data/intents.json".to_string()
}

fn default_top_k() -> usize {
    3
}

fn default_ambiguity_threshold() -> f32 {
    0.10
}

fn default_tie_break_threshold() -> f32 {
    0.25
}

fn default_interrogative_boost() -> f32 {
    1.2
}

fn default_delivery_intent_id() -> i64 {
    6
}

fn default_tracking_intent_id() -> i64 {
    7
}

fn default_cache_enabled() -> bool {
    true
}

/// French lexical heuristics: interrogative markers and the
/// delivery/tracking trigger-word lists.
///
/// The lists are tuned for Ivorian French customer messages. Trigger
/// matching is accent-insensitive (the router folds diacritics on both
/// sides), so entries may be written with their usual accents.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconConfig {
    /// Interrogative words/phrases matched case-insensitively against the
    /// raw message.
    #[serde(default = "default_interrogative_markers")]
    pub interrogative_markers: Vec<String>,

    /// Delivery-related trigger words, including Abidjan zone names.
    #[serde(default = "default_delivery_triggers")]
    pub delivery_triggers: Vec<String>,

    /// Order-tracking trigger words and phrases.
    #[serde(default = "default_tracking_triggers")]
    pub tracking_triggers: Vec<String>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            interrogative_markers: default_interrogative_markers(),
            delivery_triggers: default_delivery_triggers(),
            tracking_triggers: default_tracking_triggers(),
        }
    }
}

fn default_interrogative_markers() -> Vec<String> {
    [
        "où",
        "comment",
        "combien",
        "pourquoi",
        "quand",
        "quel",
        "quelle",
        "qui",
        "quoi",
        "c'est quoi",
        "est-ce que",
        "qu'est-ce",
        "à quelle heure",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_delivery_triggers() -> Vec<String> {
    [
        "livraison",
        "livrer",
        "frais",
        "adresse",
        "zone",
        "délai",
        "expédier",
        "envoyer",
        // Abidjan communes and districts customers name when asking
        // about delivery coverage.
        "cocody",
        "yopougon",
        "abobo",
        "adjamé",
        "marcory",
        "koumassi",
        "treichville",
        "plateau",
        "port-bouët",
        "bingerville",
        "angré",
        "riviera",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_tracking_triggers() -> Vec<String> {
    [
        "suivi",
        "statut",
        "numéro de suivi",
        "où en est",
        "livreur",
        "colis",
        "ma commande",
        "commande passée",
        "toujours pas reçu",
        "pas encore reçu",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_tuning() {
        let config = BotliveConfig::default();
        assert_eq!(config.router.default_top_k, 3);
        assert!((config.router.ambiguity_threshold - 0.10).abs() < f32::EPSILON);
        assert!((config.router.tie_break_threshold - 0.25).abs() < f32::EPSILON);
        assert!((config.router.interrogative_boost - 1.2).abs() < f32::EPSILON);
        assert_ne!(
            config.router.delivery_intent_id,
            config.router.tracking_intent_id
        );
        assert!(config.router.cache_enabled);
        assert!(config.router.fallback_intent_id.is_none());
    }

    #[test]
    fn lexicon_defaults_carry_the_french_heuristics() {
        let lexicon = LexiconConfig::default();
        for marker in ["où", "combien", "c'est quoi"] {
            assert!(
                lexicon.interrogative_markers.iter().any(|m| m == marker),
                "missing interrogative marker {marker}"
            );
        }
        for trigger in ["livraison", "cocody", "délai"] {
            assert!(
                lexicon.delivery_triggers.iter().any(|t| t == trigger),
                "missing delivery trigger {trigger}"
            );
        }
        for trigger in ["suivi", "où en est", "livreur"] {
            assert!(
                lexicon.tracking_triggers.iter().any(|t| t == trigger),
                "missing tracking trigger {trigger}"
            );
        }
    }

    #[test]
    fn sections_parse_from_toml() {
        let toml_str = r#"
[agent]
name = "boutique-bot"

[router]
corpus_path = "/srv/botlive/intents.json"
fallback_intent_id = 1
cache_enabled = false

[lexicon]
tracking_triggers = ["suivi"]
"#;
        let config: BotliveConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agent.name, "boutique-bot");
        assert_eq!(config.router.corpus_path, "/srv/botlive/intents.json");
        assert_eq!(config.router.fallback_intent_id, Some(1));
        assert!(!config.router.cache_enabled);
        assert_eq!(config.lexicon.tracking_triggers, vec!["suivi"]);
        // Unset sections keep their defaults.
        assert_eq!(
            config.embedding.model_name,
            "paraphrase-multilingual-MiniLM-L12-v2"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml_str = r#"
[router]
top_k = 5
"#;
        assert!(toml::from_str::<BotliveConfig>(toml_str).is_err());
    }
}
