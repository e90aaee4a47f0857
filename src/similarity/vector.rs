//! Embedding-space metrics. Inputs are `f32`, accumulation is `f64`.

use super::error::SimilarityError;

fn check_dims(a: &[f32], b: &[f32]) -> Result<(), SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            reference: a.len(),
            candidate: b.len(),
        });
    }
    if a.is_empty() {
        return Err(SimilarityError::EmptyEmbedding);
    }
    Ok(())
}

/// Cosine similarity in `[-1, 1]`. A zero-norm vector yields `0.0`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    check_dims(a, b)?;

    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return Ok(0.0);
    }

    // Rounding can push identical vectors a hair past 1.
    Ok((dot / denom).clamp(-1.0, 1.0))
}

/// Euclidean (L2) distance.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    check_dims(a, b)?;

    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum();

    Ok(sum.sqrt())
}

/// Manhattan (L1) distance.
pub fn manhattan_distance(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    check_dims(a, b)?;

    Ok(a.iter()
        .zip(b)
        .map(|(&x, &y)| (x as f64 - y as f64).abs())
        .sum())
}
