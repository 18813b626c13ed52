// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Botlive routing subsystem.
//!
//! This crate provides the shared error type, the embedding backend trait,
//! the embedding I/O types, and the vector math helpers used by the
//! centroid router and the embedding adapters.

pub mod error;
pub mod traits;
pub mod types;
pub mod vector;

// Re-export key items at crate root for ergonomic imports.
pub use error::BotliveError;
pub use traits::TextEmbedder;
pub use types::{EmbeddingInput, EmbeddingOutput};
