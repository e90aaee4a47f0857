use thiserror::Error;

use super::SimilarityMethod;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimilarityError {
    /// Method name did not match any [`SimilarityMethod`].
    #[error("invalid argument: unknown similarity method '{name}' (expected one of cosine, euclidean, manhattan, jaccard, levenshtein)")]
    InvalidMethod { name: String },

    /// Vectors of different lengths were compared.
    #[error("dimension mismatch: reference has {reference} dimensions, candidate has {candidate}")]
    DimensionMismatch { reference: usize, candidate: usize },

    /// Zero-length vectors were compared.
    #[error("embedding vectors are empty")]
    EmptyEmbedding,

    /// An embedding method was requested without vectors.
    #[error("{method} similarity requires embeddings")]
    MissingEmbeddings { method: SimilarityMethod },
}
