use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ScoringError;
use crate::constants::{
    DEFAULT_EUCLIDEAN_MAX, DEFAULT_EXCELLENT_THRESHOLD, DEFAULT_FAIR_THRESHOLD,
    DEFAULT_MANHATTAN_MAX, DEFAULT_PENALTY_WEIGHT, DEFAULT_SCALE_OUT_OF,
};
use crate::text::TextLimits;

/// Upper bounds used to invert distance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceBounds {
    /// Euclidean `raw_max`. Default: `2.0`.
    pub euclidean_max: f64,
    /// Manhattan `raw_max`. Default: `100.0`.
    pub manhattan_max: f64,
}

impl Default for DistanceBounds {
    fn default() -> Self {
        Self {
            euclidean_max: DEFAULT_EUCLIDEAN_MAX,
            manhattan_max: DEFAULT_MANHATTAN_MAX,
        }
    }
}

/// Inclusive lower bounds of the label tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelThresholds {
    /// Default: `0.8`.
    pub excellent: f64,
    /// Default: `0.5`.
    pub fair: f64,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            excellent: DEFAULT_EXCELLENT_THRESHOLD,
            fair: DEFAULT_FAIR_THRESHOLD,
        }
    }
}

/// Everything the final scorer needs besides the two texts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Share of the similarity score that full keyword loss removes. Default: `0.4`.
    pub penalty_weight: f64,
    pub thresholds: LabelThresholds,
    pub bounds: DistanceBounds,
    /// Presentation scale for `scaled_score`. Default: `5.0`.
    pub scale_out_of: f64,
    pub limits: TextLimits,
}

impl ScoringConfig {
    const ENV_PENALTY_WEIGHT: &'static str = "GRADER_PENALTY_WEIGHT";
    const ENV_EXCELLENT_THRESHOLD: &'static str = "GRADER_EXCELLENT_THRESHOLD";
    const ENV_FAIR_THRESHOLD: &'static str = "GRADER_FAIR_THRESHOLD";
    const ENV_EUCLIDEAN_MAX: &'static str = "GRADER_EUCLIDEAN_MAX";
    const ENV_MANHATTAN_MAX: &'static str = "GRADER_MANHATTAN_MAX";
    const ENV_SCALE_OUT_OF: &'static str = "GRADER_SCALE_OUT_OF";
    const ENV_MAX_SENTENCES: &'static str = "GRADER_MAX_SENTENCES";
    const ENV_MIN_WORDS: &'static str = "GRADER_MIN_WORDS";
    const ENV_ENFORCE_SENTENCE_LIMIT: &'static str = "GRADER_ENFORCE_SENTENCE_LIMIT";

    /// Loads overrides from `GRADER_*` variables, then validates.
    pub fn from_env() -> Result<Self, ScoringError> {
        let defaults = Self::default();

        let config = Self {
            penalty_weight: parse_env(Self::ENV_PENALTY_WEIGHT, defaults.penalty_weight)?,
            thresholds: LabelThresholds {
                excellent: parse_env(
                    Self::ENV_EXCELLENT_THRESHOLD,
                    defaults.thresholds.excellent,
                )?,
                fair: parse_env(Self::ENV_FAIR_THRESHOLD, defaults.thresholds.fair)?,
            },
            bounds: DistanceBounds {
                euclidean_max: parse_env(Self::ENV_EUCLIDEAN_MAX, defaults.bounds.euclidean_max)?,
                manhattan_max: parse_env(Self::ENV_MANHATTAN_MAX, defaults.bounds.manhattan_max)?,
            },
            scale_out_of: parse_env(Self::ENV_SCALE_OUT_OF, defaults.scale_out_of)?,
            limits: TextLimits {
                max_sentences: parse_env(Self::ENV_MAX_SENTENCES, defaults.limits.max_sentences)?,
                min_words: parse_env(Self::ENV_MIN_WORDS, defaults.limits.min_words)?,
                enforce_sentence_limit: parse_env(
                    Self::ENV_ENFORCE_SENTENCE_LIMIT,
                    defaults.limits.enforce_sentence_limit,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_penalty_weight(mut self, penalty_weight: f64) -> Self {
        self.penalty_weight = penalty_weight;
        self
    }

    pub fn with_thresholds(mut self, excellent: f64, fair: f64) -> Self {
        self.thresholds = LabelThresholds { excellent, fair };
        self
    }

    pub fn with_bounds(mut self, euclidean_max: f64, manhattan_max: f64) -> Self {
        self.bounds = DistanceBounds {
            euclidean_max,
            manhattan_max,
        };
        self
    }

    pub fn with_scale_out_of(mut self, scale_out_of: f64) -> Self {
        self.scale_out_of = scale_out_of;
        self
    }

    pub fn with_limits(mut self, limits: TextLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Checks ranges and threshold ordering.
    ///
    /// Thresholds must satisfy `0 <= fair < excellent <= 1` so the label tiers are
    /// monotonic and cover all of `[0, 1]`.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let invalid = |reason: String| Err(ScoringError::InvalidConfig { reason });

        if !(0.0..=1.0).contains(&self.penalty_weight) {
            return invalid(format!(
                "penalty_weight must be between 0.0 and 1.0, got {}",
                self.penalty_weight
            ));
        }

        let LabelThresholds { excellent, fair } = self.thresholds;
        if !(0.0..=1.0).contains(&fair) || !(0.0..=1.0).contains(&excellent) || fair >= excellent
        {
            return invalid(format!(
                "thresholds must satisfy 0 <= fair < excellent <= 1, got fair={} excellent={}",
                fair, excellent
            ));
        }

        for (name, bound) in [
            ("euclidean_max", self.bounds.euclidean_max),
            ("manhattan_max", self.bounds.manhattan_max),
            ("scale_out_of", self.scale_out_of),
        ] {
            if !bound.is_finite() || bound <= 0.0 {
                return invalid(format!("{} must be positive and finite, got {}", name, bound));
            }
        }

        if self.limits.max_sentences == 0 {
            return invalid("max_sentences must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            penalty_weight: DEFAULT_PENALTY_WEIGHT,
            thresholds: LabelThresholds::default(),
            bounds: DistanceBounds::default(),
            scale_out_of: DEFAULT_SCALE_OUT_OF,
            limits: TextLimits::default(),
        }
    }
}

fn parse_env<T>(name: &'static str, default: T) -> Result<T, ScoringError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ScoringError::InvalidEnvValue {
                name,
                reason: e.to_string(),
                value,
            })
        }
        _ => Ok(default),
    }
}
