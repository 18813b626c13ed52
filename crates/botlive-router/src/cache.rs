// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort disk cache for computed centroid vectors.
//!
//! One file per intent, keyed by sanitized embedding-model name, cache
//! format version, and intent id. Contents are the raw little-endian f32
//! bytes of the centroid, so round-trips are exact. The cache is
//! advisory: reads treat unreadable or wrong-length files as a miss, and
//! callers log-and-continue on write failures.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use botlive_core::vector::{blob_to_vec, vec_to_blob};

/// Bump to invalidate every cached centroid after a format or weighting
/// change.
pub const CACHE_VERSION: &str = "v3";

/// Failure while persisting a cache entry. Never fatal to callers.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Disk-backed centroid cache for one embedding model.
pub struct CentroidCache {
    dir: PathBuf,
    model_tag: String,
}

impl CentroidCache {
    /// Create a cache rooted at `dir` for the given embedding model.
    pub fn new(dir: impl Into<PathBuf>, model_name: &str) -> Self {
        Self {
            dir: dir.into(),
            model_tag: sanitize_model_name(model_name),
        }
    }

    /// Path of the cache entry for an intent.
    pub fn entry_path(&self, intent_id: i64) -> PathBuf {
        self.dir.join(format!(
            "{}_{}_intent_{}.vec",
            self.model_tag, CACHE_VERSION, intent_id
        ))
    }

    /// Load a cached centroid, or `None` on any miss.
    ///
    /// Wrong-length and unreadable files count as misses so a corrupt
    /// entry only costs a recompute.
    pub fn get(&self, intent_id: i64, dimensions: usize) -> Option<Vec<f32>> {
        let path = self.entry_path(intent_id);
        let blob = match std::fs::read(&path) {
            Ok(blob) => blob,
            Err(_) => return None,
        };

        match blob_to_vec(&blob) {
            Some(vector) if vector.len() == dimensions => {
                debug!(intent_id, path = %path.display(), "centroid cache hit");
                Some(vector)
            }
            _ => {
                warn!(
                    intent_id,
                    path = %path.display(),
                    "discarding corrupt centroid cache entry"
                );
                None
            }
        }
    }

    /// Persist a centroid vector, creating the cache directory if needed.
    pub fn put(&self, intent_id: i64, vector: &[f32]) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.entry_path(intent_id), vec_to_blob(vector))?;
        Ok(())
    }

    /// Cache directory root.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Replace every non-alphanumeric character with `-` so model names are
/// safe as file-name components.
fn sanitize_model_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
