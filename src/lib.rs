//! Short-answer grading library (used by the server and integration tests).
//!
//! A candidate answer is compared with a reference answer by one of five similarity
//! methods, normalized onto `[0, 1]`, penalized for reference keywords it misses, and
//! labeled.
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`Grader`], [`GradeRequest`], [`GradeReport`], [`GradingError`] - End-to-end grading
//! - [`grade_with_timeout`] - Async boundary around the blocking pipeline
//!
//! ## Building Blocks
//! - [`validate_pair`], [`TextLimits`], [`Advisory`] - Input validation
//! - [`SimilarityMethod`], [`raw_similarity`] - Raw similarity and distance values
//! - [`ScoringConfig`], [`normalize`], [`KeywordGap`], [`Label`] - Scoring rules
//!
//! ## Embedding
//! - [`Embedder`] - Provider seam
//! - [`SentenceEmbedder`], [`EmbedderConfig`] - candle BERT encoder or deterministic stub
//! - [`EmbedderRegistry`] - Loads each model once and shares it
//!
//! ## Service
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//! - [`gateway`] - HTTP router
//! - [`bank`] - Built-in example questions

pub mod bank;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod grading;
pub mod scoring;
pub mod similarity;
pub mod text;

pub use bank::{EXAMPLES, ExampleEntry, find_example};
pub use config::{Config, ConfigError};
pub use embedding::{Embedder, EmbedderConfig, EmbedderRegistry, EmbeddingError, SentenceEmbedder};
pub use grading::{GradeReport, GradeRequest, Grader, GradingError, grade_with_timeout};
pub use scoring::{
    KeywordGap, Label, LabelThresholds, ScoreBreakdown, ScoringConfig, ScoringError, normalize,
};
pub use similarity::{SimilarityError, SimilarityMethod, raw_similarity};
pub use text::{Advisory, TextLimits, TextMetrics, TextRole, ValidationError, validate_pair};
