use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::scoring::ScoringError;
use crate::similarity::SimilarityError;
use crate::text::ValidationError;

#[derive(Debug, Error)]
pub enum GradingError {
    /// Input refused before scoring; the message names the violated constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Similarity(#[from] SimilarityError),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("grading timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("grading task failed: {reason}")]
    TaskFailed { reason: String },
}

impl GradingError {
    /// Stable short code for logs and API responses.
    pub fn code(&self) -> &'static str {
        match self {
            GradingError::Validation(_) => "validation_error",
            GradingError::Similarity(SimilarityError::InvalidMethod { .. }) => "invalid_argument",
            GradingError::Similarity(SimilarityError::DimensionMismatch { .. }) => {
                "dimension_mismatch"
            }
            GradingError::Similarity(_) => "similarity_error",
            GradingError::Embedding(_) => "embedding_error",
            GradingError::Scoring(_) => "config_error",
            GradingError::Timeout { .. } => "timeout",
            GradingError::TaskFailed { .. } => "internal_error",
        }
    }

    /// Returns `true` if the caller's input (not the system) is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GradingError::Validation(_)
                | GradingError::Similarity(SimilarityError::InvalidMethod { .. })
        )
    }
}
