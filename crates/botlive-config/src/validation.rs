// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as threshold ranges and non-empty word lists.

use crate::diagnostic::ConfigError;
use crate::model::BotliveConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &BotliveConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.router.corpus_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "router.corpus_path must not be empty".to_string(),
        });
    }

    if config.embedding.model_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "embedding.model_name must not be empty".to_string(),
        });
    }

    if config.router.default_top_k < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "router.default_top_k must be at least 1, got {}",
                config.router.default_top_k
            ),
        });
    }

    for (key, value) in [
        ("router.ambiguity_threshold", config.router.ambiguity_threshold),
        ("router.tie_break_threshold", config.router.tie_break_threshold),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be within [0.0, 1.0], got {value}"),
            });
        }
    }

    if config.router.interrogative_boost < 1.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "router.interrogative_boost must be at least 1.0, got {}",
                config.router.interrogative_boost
            ),
        });
    }

    if config.router.delivery_intent_id == config.router.tracking_intent_id {
        errors.push(ConfigError::Validation {
            message: format!(
                "router.delivery_intent_id and router.tracking_intent_id must differ, both are {}",
                config.router.delivery_intent_id
            ),
        });
    }

    for (key, list) in [
        (
            "lexicon.interrogative_markers",
            &config.lexicon.interrogative_markers,
        ),
        ("lexicon.delivery_triggers", &config.lexicon.delivery_triggers),
        ("lexicon.tracking_triggers", &config.lexicon.tracking_triggers),
    ] {
        if list.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
        if list.iter().any(|entry| entry.trim().is_empty()) {
            errors.push(ConfigError::Validation {
                message: format!("{key} contains a blank entry"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = BotliveConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_corpus_path_fails_validation() {
        let mut config = BotliveConfig::default();
        config.router.corpus_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("corpus_path"))));
    }

    #[test]
    fn out_of_range_threshold_fails_validation() {
        let mut config = BotliveConfig::default();
        config.router.ambiguity_threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("ambiguity_threshold"))));
    }

    #[test]
    fn deboosting_interrogative_factor_fails_validation() {
        let mut config = BotliveConfig::default();
        config.router.interrogative_boost = 0.8;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn identical_pair_ids_fail_validation() {
        let mut config = BotliveConfig::default();
        config.router.tracking_intent_id = config.router.delivery_intent_id;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("must differ"))));
    }

    #[test]
    fn empty_lexicon_list_fails_validation() {
        let mut config = BotliveConfig::default();
        config.lexicon.delivery_triggers.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("delivery_triggers"))));
    }

    #[test]
    fn collects_all_errors_not_just_first() {
        let mut config = BotliveConfig::default();
        config.router.corpus_path = "".to_string();
        config.router.default_top_k = 0;
        config.lexicon.tracking_triggers.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
