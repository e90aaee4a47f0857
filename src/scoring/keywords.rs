//! Lexical coverage of reference words by the candidate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::text::word_set;

/// Reference words absent from the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeywordGap {
    /// Missing words, lowercased and sorted.
    pub missing: Vec<String>,
    /// `missing.len()`.
    pub missing_count: usize,
    /// Distinct words in the reference.
    pub total_keywords: usize,
}

impl KeywordGap {
    /// Set difference `reference_words - candidate_words` (case-insensitive).
    pub fn analyze(reference: &str, candidate: &str) -> Self {
        let reference_words = word_set(reference);
        let candidate_words = word_set(candidate);

        // BTreeSet iteration keeps this sorted.
        let missing: Vec<String> = reference_words
            .difference(&candidate_words)
            .cloned()
            .collect();

        let gap = Self {
            missing_count: missing.len(),
            total_keywords: reference_words.len(),
            missing,
        };

        debug!(
            missing = gap.missing_count,
            total = gap.total_keywords,
            "Analyzed keyword coverage"
        );

        gap
    }

    /// Fraction of reference words that are missing. `0.0` for an empty reference.
    pub fn missing_fraction(&self) -> f64 {
        self.missing_count as f64 / self.total_keywords.max(1) as f64
    }

    /// Fraction of reference words the candidate covers.
    pub fn coverage(&self) -> f64 {
        if self.total_keywords == 0 {
            return 1.0;
        }
        1.0 - self.missing_fraction()
    }

    /// Returns `true` if every reference word appears in the candidate.
    pub fn is_complete(&self) -> bool {
        self.missing_count == 0
    }
}
