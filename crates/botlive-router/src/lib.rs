// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent-centroid routing for the Botlive conversational assistant.
//!
//! Incoming customer messages are classified against per-intent semantic
//! centroids: every intent in the labeled corpus contributes weighted
//! example-utterance groups (natural, noisy, Nouchi slang, ambiguous,
//! generic-zone, delivery-confirmation) to a unit-length centroid vector,
//! and a message routes to the intent whose centroid is closest by cosine
//! similarity, refined by interrogative boosting, lexical trigger
//! boosting, and a dedicated tie-break for the delivery/tracking
//! confusable pair.
//!
//! This crate provides:
//! - [`IntentCorpus`]: corpus loading with legacy field-name normalization
//! - [`CentroidRouter`]: centroid construction and message classification
//! - [`CentroidCache`]: best-effort disk cache for computed centroids
//! - [`IntentValidator`]: offline accuracy measurement over the corpus
//!
//! The router is read-only after construction; concurrent `route` calls
//! are safe without locking.

pub mod cache;
pub mod centroid;
pub mod corpus;
pub mod lexicon;
pub mod router;
pub mod validator;

pub use cache::{CacheError, CentroidCache};
pub use centroid::{GroupWeights, IntentCentroid};
pub use corpus::{Intent, IntentCorpus, VariationGroups};
pub use router::{CentroidRouter, RoutingResult, TopIntent};
pub use validator::{IntentAccuracy, IntentValidator, Misclassification, ValidationReport};
