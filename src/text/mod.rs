//! Text metrics and answer validation.
//!
//! Sentences are segments between `.`, `!` and `?`. Words are maximal runs of word
//! characters (Unicode letters, digits and `_`). The same word rule drives keyword
//! coverage in [`crate::scoring::keywords`].

mod error;


pub use error::ValidationError;

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{DEFAULT_MAX_SENTENCES, DEFAULT_MIN_WORDS};

const SENTENCE_TERMINALS: [char; 3] = ['.', '!', '?'];

/// Which side of the comparison a text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    /// The ideal answer.
    Reference,
    /// The answer being graded.
    Candidate,
}

impl TextRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextRole::Reference => "reference",
            TextRole::Candidate => "candidate",
        }
    }
}

impl fmt::Display for TextRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts non-empty segments between sentence terminals. Blank text yields 0.
pub fn count_sentences(text: &str) -> usize {
    text.split(SENTENCE_TERMINALS)
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Iterates maximal runs of word characters in `text`, in order.
pub fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
}

/// Counts words. Punctuation and whitespace are never words.
pub fn count_words(text: &str) -> usize {
    word_tokens(text).count()
}

/// Lowercased set of word-boundary tokens, sorted for stable output.
pub fn word_set(text: &str) -> BTreeSet<String> {
    word_tokens(text).map(str::to_lowercase).collect()
}

/// Lowercased set of whitespace-separated tokens (punctuation stays attached).
pub fn whitespace_token_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Derived counts for one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub sentences: usize,
    pub words: usize,
}

impl TextMetrics {
    pub fn measure(text: &str) -> Self {
        Self {
            sentences: count_sentences(text),
            words: count_words(text),
        }
    }
}

/// Length limits applied before grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLimits {
    /// Max sentences in either answer. Default: `3`.
    pub max_sentences: usize,
    /// Candidates under this many words get a [`Advisory::ShortAnswer`]. Default: `3`.
    pub min_words: usize,
    /// Hard mode refuses over-limit texts; soft mode only reports them. Default: `true`.
    pub enforce_sentence_limit: bool,
}

impl Default for TextLimits {
    fn default() -> Self {
        Self {
            max_sentences: DEFAULT_MAX_SENTENCES,
            min_words: DEFAULT_MIN_WORDS,
            enforce_sentence_limit: true,
        }
    }
}

/// Non-blocking remarks attached to a grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Candidate is shorter than the configured minimum.
    ShortAnswer { words: usize, min_words: usize },
    /// A text is over the sentence limit but the limit is not enforced.
    SentenceLimitExceeded {
        role: TextRole,
        sentences: usize,
        limit: usize,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::ShortAnswer { words, min_words } => write!(
                f,
                "candidate is very short ({} words, fewer than {})",
                words, min_words
            ),
            Advisory::SentenceLimitExceeded {
                role,
                sentences,
                limit,
            } => write!(
                f,
                "{} exceeds {} sentences (found {})",
                role, limit, sentences
            ),
        }
    }
}

/// Outcome of validating a reference/candidate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPair {
    pub reference: TextMetrics,
    pub candidate: TextMetrics,
    pub advisories: Vec<Advisory>,
}

/// Validates both answers against `limits`.
///
/// Empty input is always an error. The reference is checked before the candidate so
/// the reported violation is stable.
pub fn validate_pair(
    reference: &str,
    candidate: &str,
    limits: &TextLimits,
) -> Result<ValidatedPair, ValidationError> {
    for (role, text) in [
        (TextRole::Reference, reference),
        (TextRole::Candidate, candidate),
    ] {
        if text.trim().is_empty() {
            return Err(ValidationError::Empty { role });
        }
    }

    let reference_metrics = TextMetrics::measure(reference);
    let candidate_metrics = TextMetrics::measure(candidate);
    let mut advisories = Vec::new();

    for (role, metrics) in [
        (TextRole::Reference, reference_metrics),
        (TextRole::Candidate, candidate_metrics),
    ] {
        if metrics.sentences <= limits.max_sentences {
            continue;
        }
        if limits.enforce_sentence_limit {
            return Err(ValidationError::TooManySentences {
                role,
                sentences: metrics.sentences,
                limit: limits.max_sentences,
            });
        }
        advisories.push(Advisory::SentenceLimitExceeded {
            role,
            sentences: metrics.sentences,
            limit: limits.max_sentences,
        });
    }

    if candidate_metrics.words < limits.min_words {
        advisories.push(Advisory::ShortAnswer {
            words: candidate_metrics.words,
            min_words: limits.min_words,
        });
    }

    for advisory in &advisories {
        warn!(advisory = %advisory, "Grading advisory");
    }

    debug!(
        reference_sentences = reference_metrics.sentences,
        reference_words = reference_metrics.words,
        candidate_sentences = candidate_metrics.sentences,
        candidate_words = candidate_metrics.words,
        "Validated answer pair"
    );

    Ok(ValidatedPair {
        reference: reference_metrics,
        candidate: candidate_metrics,
        advisories,
    })
}
