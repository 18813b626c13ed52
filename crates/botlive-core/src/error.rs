// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Botlive routing subsystem.

use thiserror::Error;

/// The primary error type used across the routing subsystem.
///
/// Construction-time failures (missing corpus, unavailable embedding
/// backend, empty centroid map) are fatal and propagate to the owning
/// service. Everything else is handled as a degraded path by the callers
/// and never reaches this type.
#[derive(Debug, Error)]
pub enum BotliveError {
    /// Configuration errors (invalid TOML, out-of-range thresholds).
    #[error("configuration error: {0}")]
    Config(String),

    /// Corpus errors (file missing, unparseable JSON, schema violations).
    #[error("corpus error: {message}")]
    Corpus {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Embedding backend errors (model files missing, tokenization or
    /// inference failure).
    #[error("embedding error: {message}")]
    Embedding {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Every intent in the corpus was filtered out during centroid
    /// construction. A router with no intents is useless.
    #[error("no usable centroids were produced from the corpus")]
    EmptyCentroidMap,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
