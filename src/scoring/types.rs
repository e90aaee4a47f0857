use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::{LabelThresholds, ScoringConfig};
use super::keywords::KeywordGap;
use super::scorer::{final_score, keyword_penalty, round_score, scale_score};

/// Qualitative grade tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Excellent,
    Fair,
    NeedsImprovement,
}

impl Label {
    /// Picks the tier for `score`. Every value maps to exactly one label.
    pub fn from_score(score: f64, thresholds: &LabelThresholds) -> Self {
        if score >= thresholds.excellent {
            Label::Excellent
        } else if score >= thresholds.fair {
            Label::Fair
        } else {
            Label::NeedsImprovement
        }
    }

    /// Human-readable feedback for the tier.
    pub fn feedback(&self) -> &'static str {
        match self {
            Label::Excellent => "Excellent answer, good job.",
            Label::Fair => "Fair answer, doing good.",
            Label::NeedsImprovement => "Needs improvement.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Excellent => "Excellent",
            Label::Fair => "Fair",
            Label::NeedsImprovement => "Needs improvement",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Penalty, final score and label for one normalized score.
///
/// Scores here are already rounded for reporting, and the label is chosen from the
/// rounded final score so the two never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub normalized_score: f64,
    pub penalty: f64,
    pub final_score: f64,
    pub scaled_score: f64,
    pub scale_out_of: f64,
    pub label: Label,
}

impl ScoreBreakdown {
    pub fn compute(normalized: f64, gap: &KeywordGap, config: &ScoringConfig) -> Self {
        let penalty = keyword_penalty(gap, config.penalty_weight);
        let final_value = final_score(normalized, penalty);
        let rounded_final = round_score(final_value);

        Self {
            normalized_score: round_score(normalized),
            penalty: round_score(penalty),
            final_score: rounded_final,
            scaled_score: scale_score(rounded_final, config.scale_out_of),
            scale_out_of: config.scale_out_of,
            label: Label::from_score(rounded_final, &config.thresholds),
        }
    }
}
