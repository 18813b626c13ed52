// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./botlive.toml` > `~/.config/botlive/botlive.toml`
//! > `/etc/botlive/botlive.toml` with environment variable overrides via the
//! `BOTLIVE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::BotliveConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/botlive/botlive.toml` (system-wide)
/// 3. `~/.config/botlive/botlive.toml` (user XDG config)
/// 4. `./botlive.toml` (local directory)
/// 5. `BOTLIVE_*` environment variables
pub fn load_config() -> Result<BotliveConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BotliveConfig::default()))
        .merge(Toml::file("/etc/botlive/botlive.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("botlive/botlive.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("botlive.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<BotliveConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BotliveConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BotliveConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BotliveConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `BOTLIVE_ROUTER_CORPUS_PATH` must map to
/// `router.corpus_path`, not `router.corpus.path`.
fn env_provider() -> Env {
    Env::prefixed("BOTLIVE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: BOTLIVE_ROUTER_CORPUS_PATH -> "router_corpus_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("embedding_", "embedding.", 1)
            .replacen("router_", "router.", 1)
            .replacen("lexicon_", "lexicon.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.router.corpus_path, "data/intents.json");
        assert_eq!(config.agent.log_level, "info");
    }

    #[test]
    fn toml_string_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[router]
default_top_k = 5
ambiguity_threshold = 0.2
"#,
        )
        .unwrap();
        assert_eq!(config.router.default_top_k, 5);
        assert!((config.router.ambiguity_threshold - 0.2).abs() < f32::EPSILON);
        // Untouched keys keep their defaults.
        assert!((config.router.tie_break_threshold - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(load_config_from_str("[router\n").is_err());
    }
}
