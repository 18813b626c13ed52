// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for pluggable backends of the routing subsystem.

pub mod embedding;

pub use embedding::TextEmbedder;
