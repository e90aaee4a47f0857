use tracing::debug;

use super::config::DistanceBounds;
use crate::similarity::SimilarityMethod;

/// Maps a raw method value onto `[0, 1]` (higher is better).
///
/// - Cosine: `(raw + 1) / 2`.
/// - Euclidean / Manhattan: `1 - raw / raw_max`.
/// - Jaccard / Levenshtein: used as-is.
///
/// The result is always clamped; NaN collapses to `0.0`.
pub fn normalize(method: SimilarityMethod, raw: f64, bounds: &DistanceBounds) -> f64 {
    let unclamped = match method {
        SimilarityMethod::Cosine => (raw + 1.0) / 2.0,
        SimilarityMethod::Euclidean => 1.0 - raw / bounds.euclidean_max,
        SimilarityMethod::Manhattan => 1.0 - raw / bounds.manhattan_max,
        SimilarityMethod::Jaccard | SimilarityMethod::Levenshtein => raw,
    };

    let normalized = if unclamped.is_nan() {
        0.0
    } else {
        unclamped.clamp(0.0, 1.0)
    };

    debug!(
        method = %method,
        raw = raw,
        normalized = normalized,
        "Normalized similarity"
    );

    normalized
}
