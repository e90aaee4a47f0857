//! Sentence embedder (BERT + mean pooling).
//!
//! Use [`EmbedderConfig::stub`] for tests and demos without model files. The stub hashes
//! each lowercase word to a pseudo-random direction and sums them, so texts that share
//! words land close together and identical texts embed identically.

/// Sentence embedder configuration.
pub mod config;


pub use config::{EmbedderConfig, REQUIRED_MODEL_FILES, model_dir_for};

use std::hash::{DefaultHasher, Hash, Hasher};

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use super::Embedder;
use super::bert::BertEncoder;
use super::device::select_device;
use super::error::EmbeddingError;
use super::utils::load_tokenizer;
use crate::text::word_tokens;

enum EmbedderBackend {
    Model {
        encoder: BertEncoder,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Sentence-transformer style embedder (supports stub mode).
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
    embedding_dim: usize,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("model_id", &self.config.model_id)
            .field("embedding_dim", &self.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!(
                model_id = %config.model_id,
                "Sentence embedder running in STUB mode (testing only)"
            );
            return Ok(Self {
                embedding_dim: config.embedding_dim,
                backend: EmbedderBackend::Stub,
                config,
            });
        }

        let Some(model_dir) = config.model_dir.clone() else {
            return Err(EmbeddingError::ModelUnavailable {
                model_id: config.model_id.clone(),
            });
        };

        let device = select_device();
        debug!(?device, "Selected compute device for sentence embedder");

        let encoder = BertEncoder::load(&model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            }
        })?;

        let tokenizer = load_tokenizer(&model_dir, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        let embedding_dim = encoder.hidden_size();

        info!(
            model_id = %config.model_id,
            model_dir = %model_dir.display(),
            embedding_dim,
            max_seq_len = config.max_seq_len,
            "Sentence embedder loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            },
            config,
            embedding_dim,
        })
    }

    /// Shorthand for a stub embedder with default dimensions.
    pub fn stub(model_id: &str) -> Result<Self, EmbeddingError> {
        Self::load(EmbedderConfig::stub(model_id))
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Model { .. })
    }

    fn embed_with_model(
        &self,
        text: &str,
        encoder: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        if encoding.get_ids().is_empty() {
            return Ok(vec![0.0; self.embedding_dim]);
        }

        debug!(
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            "Generating embedding (transformer forward pass)"
        );

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let pooled = encoder
            .mean_pooled(&input_ids, &token_type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Transformer forward pass failed: {}", e),
            })?;

        let embedding = pooled.to_vec1::<f32>()?;
        Ok(self.finish(embedding))
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.embedding_dim];

        for word in word_tokens(text) {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            let mut state = hasher.finish();

            for slot in embedding.iter_mut() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                *slot += ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            }
        }

        debug!(text_len = text.len(), "Generated stub embedding");
        self.finish(embedding)
    }

    fn finish(&self, mut embedding: Vec<f32>) -> Vec<f32> {
        if !self.config.normalize {
            return embedding;
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut embedding {
                *x /= norm;
            }
        }
        embedding
    }
}

impl Embedder for SentenceEmbedder {
    fn model_id(&self) -> &str {
        &self.config.model_id
    }

    fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => self.embed_with_model(text, encoder, tokenizer, device),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }
}
