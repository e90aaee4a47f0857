//! Load-once, use-many embedder registry.
//!
//! Loading a checkpoint is expensive and models are read-only after load, so each
//! model id is loaded at most once and shared as `Arc<dyn Embedder>`. The registry is
//! an explicitly owned value; nothing here is process-global.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use moka::sync::Cache;
use tracing::{debug, info, warn};

use super::Embedder;
use super::error::EmbeddingError;
use super::sentence::{EmbedderConfig, SentenceEmbedder, model_dir_for};
use crate::constants::{DEFAULT_MAX_SEQ_LEN, DEFAULT_MODEL_CACHE_CAPACITY};

/// Resolves model ids to shared embedders.
pub struct EmbedderRegistry {
    models: Cache<String, Arc<dyn Embedder>>,
    model_root: Option<PathBuf>,
    allow_stub: bool,
    max_seq_len: usize,
}

impl std::fmt::Debug for EmbedderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbedderRegistry")
            .field("model_root", &self.model_root)
            .field("allow_stub", &self.allow_stub)
            .field("loaded", &self.models.entry_count())
            .finish()
    }
}

impl EmbedderRegistry {
    /// Creates a registry that loads checkpoints from `model_root/<model id>`.
    ///
    /// With `allow_stub`, ids without a checkpoint fall back to the stub embedder.
    pub fn new(model_root: Option<PathBuf>, allow_stub: bool) -> Self {
        Self::with_capacity(model_root, allow_stub, DEFAULT_MODEL_CACHE_CAPACITY)
    }

    pub fn with_capacity(model_root: Option<PathBuf>, allow_stub: bool, capacity: u64) -> Self {
        Self {
            models: Cache::new(capacity),
            model_root,
            allow_stub,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }

    /// Registry that serves stub embedders for every id.
    pub fn stub() -> Self {
        Self::new(None, true)
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    /// Registers an already-built embedder under its own model id.
    pub fn insert(&self, embedder: Arc<dyn Embedder>) {
        let model_id = embedder.model_id().to_string();
        debug!(model_id = %model_id, "Registered embedder");
        self.models.insert(model_id, embedder);
    }

    pub fn model_root(&self) -> Option<&Path> {
        self.model_root.as_deref()
    }

    /// Returns `true` if no checkpoints can be loaded and every id resolves to a stub.
    pub fn is_stub_only(&self) -> bool {
        self.model_root.is_none() && self.allow_stub
    }

    /// Returns the embedder for `model_id` only if it is already loaded.
    pub fn loaded(&self, model_id: &str) -> Option<Arc<dyn Embedder>> {
        self.models.get(model_id)
    }

    /// Returns `true` if `model_id` is already loaded.
    pub fn contains(&self, model_id: &str) -> bool {
        self.models.contains_key(model_id)
    }

    /// Returns the embedder for `model_id`, loading it on first use.
    ///
    /// Concurrent first calls for the same id load the model once.
    pub fn get(&self, model_id: &str) -> Result<Arc<dyn Embedder>, EmbeddingError> {
        self.models
            .try_get_with(model_id.to_string(), || self.load(model_id))
            .map_err(|shared| (*shared).clone())
    }

    fn load(&self, model_id: &str) -> Result<Arc<dyn Embedder>, EmbeddingError> {
        let config = match &self.model_root {
            Some(root) if model_dir_for(root, model_id).is_dir() => {
                EmbedderConfig::for_model(root, model_id).with_max_seq_len(self.max_seq_len)
            }
            _ if self.allow_stub => {
                warn!(model_id = %model_id, "No checkpoint found, serving stub embeddings");
                EmbedderConfig::stub(model_id)
            }
            Some(root) => {
                return Err(EmbeddingError::ModelNotFound {
                    path: model_dir_for(root, model_id),
                });
            }
            None => {
                return Err(EmbeddingError::ModelUnavailable {
                    model_id: model_id.to_string(),
                });
            }
        };

        let embedder = SentenceEmbedder::load(config)?;
        info!(
            model_id = %model_id,
            stub = embedder.is_stub(),
            "Embedder ready"
        );
        Ok(Arc::new(embedder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_registry_loads_once() {
        let registry = EmbedderRegistry::stub();
        assert!(!registry.contains("all-MiniLM-L6-v2"));

        assert!(registry.loaded("all-MiniLM-L6-v2").is_none());
        let first = registry.get("all-MiniLM-L6-v2").unwrap();
        let second = registry.get("all-MiniLM-L6-v2").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.contains("all-MiniLM-L6-v2"));
        assert!(first.is_stub());
        assert!(registry.is_stub_only());
    }

    #[test]
    fn test_distinct_ids_get_distinct_embedders() {
        let registry = EmbedderRegistry::stub();
        let a = registry.get("model-a").unwrap();
        let b = registry.get("model-b").unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.model_id(), "model-a");
        assert_eq!(b.model_id(), "model-b");
    }

    #[test]
    fn test_missing_model_without_stub_fails() {
        let registry = EmbedderRegistry::new(None, false);
        let err = registry.get("all-MiniLM-L6-v2").unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_repeated_failed_load_keeps_error_kind() {
        let registry = EmbedderRegistry::new(None, false);
        for _ in 0..3 {
            let err = registry.get("all-MiniLM-L12-v2").unwrap_err();
            match err {
                EmbeddingError::ModelUnavailable { model_id } => {
                    assert_eq!(model_id, "all-MiniLM-L12-v2");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
        assert!(!registry.contains("all-MiniLM-L12-v2"));
    }

    #[test]
    fn test_missing_checkpoint_under_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let registry = EmbedderRegistry::new(Some(dir.path().to_path_buf()), false);

        let err = registry.get("pritamdeka/S-PubMedBERT-MS-MARCO").unwrap_err();
        match err {
            EmbeddingError::ModelNotFound { path } => {
                assert!(path.ends_with("pritamdeka--S-PubMedBERT-MS-MARCO"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!registry.contains("pritamdeka/S-PubMedBERT-MS-MARCO"));
    }

    #[test]
    fn test_incomplete_checkpoint_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("partial")).unwrap();
        let registry = EmbedderRegistry::new(Some(dir.path().to_path_buf()), true);

        let err = registry.get("partial").unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
    }

    #[test]
    fn test_insert_custom_embedder() {
        let registry = EmbedderRegistry::new(None, false);
        let embedder: Arc<dyn Embedder> =
            Arc::new(SentenceEmbedder::stub("custom").unwrap());
        registry.insert(embedder.clone());

        let fetched = registry.get("custom").unwrap();
        assert!(Arc::ptr_eq(&embedder, &fetched));
    }
}
