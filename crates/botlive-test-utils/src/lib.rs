// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Botlive routing tests.
//!
//! Provides a deterministic stub embedder so centroid construction and
//! routing can be exercised in fast, CI-runnable tests without model
//! files or network access.

pub mod stub_embedder;

pub use stub_embedder::StubEmbedder;
