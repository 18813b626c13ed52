// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local sentence-embedding inference for the Botlive routing subsystem.
//!
//! Provides ONNX-based CPU inference with the multilingual MiniLM
//! sentence-transformer (384-dim output, suited to French/Ivorian French
//! customer messages) and a first-run model download manager.
//!
//! ## Components
//!
//! - [`MiniLmEmbedder`]: quantized ONNX model + HuggingFace tokenizer,
//!   attention-masked mean pooling, L2-normalized output
//! - [`ModelManager`]: model path resolution and first-run download

pub mod embedder;
pub mod model_manager;

pub use embedder::{MiniLmEmbedder, EMBEDDING_DIM, MODEL_NAME};
pub use model_manager::ModelManager;
