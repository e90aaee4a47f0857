use crate::constants::SCORE_DECIMALS;

use super::keywords::KeywordGap;

/// `(missing / max(total, 1)) * weight`.
pub fn keyword_penalty(gap: &KeywordGap, penalty_weight: f64) -> f64 {
    gap.missing_fraction() * penalty_weight
}

/// `max(normalized - penalty, 0)`, capped at `1.0`.
pub fn final_score(normalized: f64, penalty: f64) -> f64 {
    (normalized - penalty).clamp(0.0, 1.0)
}

/// Rounds half away from zero to the reporting precision.
pub fn round_score(value: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (value * factor).round() / factor
}

/// Presents a `[0, 1]` score on a `[0, scale]` scale, rounded like [`round_score`].
pub fn scale_score(value: f64, scale: f64) -> f64 {
    round_score(value * scale)
}
