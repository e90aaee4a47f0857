//! Raw similarity between a reference and a candidate answer.
//!
//! Embedding metrics ([`SimilarityMethod::Cosine`], [`SimilarityMethod::Euclidean`],
//! [`SimilarityMethod::Manhattan`]) compare two vectors from the same model. Lexical
//! metrics ([`SimilarityMethod::Jaccard`], [`SimilarityMethod::Levenshtein`]) compare the
//! raw texts and never need an embedder.
//!
//! Distances are reported as-is (lower is better). Turning them into a "higher is
//! better" score is the job of [`crate::scoring::normalize`].

mod error;
pub mod lexical;
pub mod vector;


pub use error::SimilarityError;
pub use lexical::{jaccard_similarity, levenshtein_distance, levenshtein_similarity};
pub use vector::{cosine_similarity, euclidean_distance, manhattan_distance};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Selects the raw-value function and the normalization bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMethod {
    /// Cosine of the angle between embeddings, in `[-1, 1]`.
    #[default]
    Cosine,
    /// Euclidean distance between embeddings, in `[0, inf)`.
    Euclidean,
    /// Sum of absolute coordinate differences, in `[0, inf)`.
    Manhattan,
    /// Intersection over union of whitespace token sets, in `[0, 1]`.
    Jaccard,
    /// Normalized character edit similarity, in `[0, 1]`.
    Levenshtein,
}

impl SimilarityMethod {
    pub const ALL: [SimilarityMethod; 5] = [
        SimilarityMethod::Cosine,
        SimilarityMethod::Euclidean,
        SimilarityMethod::Manhattan,
        SimilarityMethod::Jaccard,
        SimilarityMethod::Levenshtein,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMethod::Cosine => "cosine",
            SimilarityMethod::Euclidean => "euclidean",
            SimilarityMethod::Manhattan => "manhattan",
            SimilarityMethod::Jaccard => "jaccard",
            SimilarityMethod::Levenshtein => "levenshtein",
        }
    }

    /// Returns `true` if the method compares embedding vectors.
    pub fn uses_embeddings(&self) -> bool {
        matches!(
            self,
            SimilarityMethod::Cosine | SimilarityMethod::Euclidean | SimilarityMethod::Manhattan
        )
    }

    /// Returns `true` if the raw value is a distance (lower is more similar).
    pub fn is_distance(&self) -> bool {
        matches!(self, SimilarityMethod::Euclidean | SimilarityMethod::Manhattan)
    }
}

impl fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityMethod {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SimilarityError::InvalidMethod {
                name: s.to_string(),
            })
    }
}

/// Computes the method's raw value.
///
/// `embeddings` is `(reference, candidate)` and is required for embedding methods;
/// lexical methods ignore it.
pub fn raw_similarity(
    method: SimilarityMethod,
    reference: &str,
    candidate: &str,
    embeddings: Option<(&[f32], &[f32])>,
) -> Result<f64, SimilarityError> {
    let vectors = || embeddings.ok_or(SimilarityError::MissingEmbeddings { method });

    let raw = match method {
        SimilarityMethod::Cosine => {
            let (a, b) = vectors()?;
            cosine_similarity(a, b)?
        }
        SimilarityMethod::Euclidean => {
            let (a, b) = vectors()?;
            euclidean_distance(a, b)?
        }
        SimilarityMethod::Manhattan => {
            let (a, b) = vectors()?;
            manhattan_distance(a, b)?
        }
        SimilarityMethod::Jaccard => jaccard_similarity(reference, candidate),
        SimilarityMethod::Levenshtein => levenshtein_similarity(reference, candidate),
    };

    debug!(method = %method, raw = raw, "Computed raw similarity");
    Ok(raw)
}
