// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector math helpers for centroid construction and similarity scoring.
//!
//! All routing math operates on unit-length f32 vectors, so cosine
//! similarity reduces to a dot product.

/// Compute the L2 norm of a vector.
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// L2-normalize a vector in place. A zero vector is left unchanged.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = l2_norm(v);
    if norm > f32::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Compute cosine similarity between two vectors of equal length.
///
/// For L2-normalized vectors (as produced by the embedding adapters and
/// the centroid builder) this is the plain dot product.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Arithmetic mean of a set of equal-length vectors.
///
/// Returns `None` for an empty set.
pub fn mean(vectors: &[Vec<f32>]) -> Option<Vec<f32>> {
    let first = vectors.first()?;
    let mut acc = vec![0.0f32; first.len()];
    for v in vectors {
        for (slot, x) in acc.iter_mut().zip(v.iter()) {
            *slot += x;
        }
    }
    let count = vectors.len() as f32;
    for slot in &mut acc {
        *slot /= count;
    }
    Some(acc)
}

/// Serialize an f32 vector to little-endian bytes for disk storage.
pub fn vec_to_blob(vec: &[f32]) -> Vec<u8> {
    vec.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Deserialize little-endian bytes back into an f32 vector.
///
/// Returns `None` if the byte length is not a multiple of four.
pub fn blob_to_vec(blob: &[u8]) -> Option<Vec<f32>> {
    if blob.len() % 4 != 0 {
        return None;
    }
    Some(
        blob.chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect(),
    )
}
