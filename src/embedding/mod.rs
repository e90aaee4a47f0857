//! Embedding provider seam.
//!
//! The grading pipeline only sees the [`Embedder`] trait. [`SentenceEmbedder`] is the
//! built-in implementation (BERT-family sentence encoder on candle, or a deterministic
//! stub), and [`EmbedderRegistry`] loads each model once and shares it.

/// BERT encoder wrapper used by the sentence embedder.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Load-once model registry.
pub mod registry;
/// Sentence embedder (mean-pooled BERT or stub).
pub mod sentence;
/// Tokenizer loading helpers.
pub mod utils;

pub use error::EmbeddingError;
pub use registry::EmbedderRegistry;
pub use sentence::{EmbedderConfig, SentenceEmbedder};

/// Turns text into fixed-length vectors.
///
/// Implementations must be deterministic for a fixed model and text, and safe to call
/// from several threads at once. The dimension is fixed per model.
pub trait Embedder: Send + Sync + std::fmt::Debug {
    /// Identifier of the underlying model.
    fn model_id(&self) -> &str;

    /// Length of every vector this embedder returns.
    fn embedding_dim(&self) -> usize;

    /// Returns `true` for test doubles that do not run a real model.
    fn is_stub(&self) -> bool {
        false
    }

    /// Embeds one text.
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embeds several texts, one vector per input, in order.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.encode(text)).collect()
    }
}
