use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN, DEFAULT_MODEL_ID};
use crate::embedding::error::EmbeddingError;

/// Files a sentence-transformer checkpoint directory must contain.
pub const REQUIRED_MODEL_FILES: [&str; 3] = ["config.json", "model.safetensors", "tokenizer.json"];

/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Model identifier reported in grade results.
    pub model_id: String,
    /// Checkpoint directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    pub model_dir: Option<PathBuf>,
    /// Max tokens fed to the encoder.
    pub max_seq_len: usize,
    /// Output dimension in stub mode. Real models report their hidden size.
    pub embedding_dim: usize,
    /// L2-normalize output vectors.
    pub normalize: bool,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            model_dir: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            normalize: true,
            testing_stub: false,
        }
    }
}

impl EmbedderConfig {
    /// Creates a config for a checkpoint directory.
    pub fn new<S: Into<String>, P: Into<PathBuf>>(model_id: S, model_dir: P) -> Self {
        Self {
            model_id: model_id.into(),
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    /// Resolves `model_id` under `model_root`; `/` in hub-style ids becomes `--`.
    pub fn for_model(model_root: &Path, model_id: &str) -> Self {
        Self::new(model_id, model_dir_for(model_root, model_id))
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub<S: Into<String>>(model_id: S) -> Self {
        Self {
            model_id: model_id.into(),
            testing_stub: true,
            ..Default::default()
        }
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    /// Validates required fields for the selected mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.model_id.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_id cannot be empty".to_string(),
            });
        }

        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be at least 1".to_string(),
            });
        }

        if self.testing_stub {
            if self.embedding_dim == 0 {
                return Err(EmbeddingError::InvalidConfig {
                    reason: "embedding_dim must be at least 1".to_string(),
                });
            }
            return Ok(());
        }

        let Some(dir) = &self.model_dir else {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        };

        for file in REQUIRED_MODEL_FILES {
            let path = dir.join(file);
            if !path.exists() {
                return Err(EmbeddingError::ModelNotFound { path });
            }
        }

        Ok(())
    }

    /// Returns `true` if every required checkpoint file exists.
    pub fn model_available(&self) -> bool {
        self.model_dir
            .as_ref()
            .is_some_and(|dir| REQUIRED_MODEL_FILES.iter().all(|f| dir.join(f).exists()))
    }
}

/// Directory name used for `model_id` under a model root.
pub fn model_dir_for(model_root: &Path, model_id: &str) -> PathBuf {
    model_root.join(model_id.replace('/', "--"))
}
