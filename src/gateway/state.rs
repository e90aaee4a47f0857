use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::constants::{DEFAULT_EMBED_TIMEOUT_MS, DEFAULT_MODEL_ID};
use crate::embedding::EmbedderRegistry;
use crate::scoring::ScoringConfig;
use crate::similarity::SimilarityMethod;

#[derive(Debug, Clone)]
pub struct HandlerState {
    pub registry: Arc<EmbedderRegistry>,

    pub scoring: ScoringConfig,

    /// Model id used when a request names none.
    pub default_model: String,

    pub default_method: SimilarityMethod,

    /// Deadline for one grading call, embedding included.
    pub timeout: Duration,
}

impl HandlerState {
    pub fn new(registry: Arc<EmbedderRegistry>, scoring: ScoringConfig) -> Self {
        Self {
            registry,
            scoring,
            default_model: DEFAULT_MODEL_ID.to_string(),
            default_method: SimilarityMethod::default(),
            timeout: Duration::from_millis(DEFAULT_EMBED_TIMEOUT_MS),
        }
    }

    pub fn from_config(registry: Arc<EmbedderRegistry>, config: &Config) -> Self {
        Self {
            registry,
            scoring: config.scoring,
            default_model: config.default_model.clone(),
            default_method: config.default_method,
            timeout: config.embed_timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_model<S: Into<String>>(mut self, model_id: S) -> Self {
        self.default_model = model_id.into();
        self
    }
}
