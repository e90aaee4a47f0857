//! Cross-cutting, shared constants.
//!
//! These are the defaults behind [`ScoringConfig`](crate::scoring::ScoringConfig) and
//! [`Config`](crate::config::Config). Every value here can be overridden at runtime; the
//! constants exist so tests and docs agree on one set of numbers.

/// Fraction of the similarity score that full keyword loss can subtract.
pub const DEFAULT_PENALTY_WEIGHT: f64 = 0.4;

/// Lower bound (inclusive) of the top label tier.
pub const DEFAULT_EXCELLENT_THRESHOLD: f64 = 0.8;

/// Lower bound (inclusive) of the middle label tier.
pub const DEFAULT_FAIR_THRESHOLD: f64 = 0.5;

/// Upper bound for Euclidean distance. Exact for L2-normalized embeddings.
pub const DEFAULT_EUCLIDEAN_MAX: f64 = 2.0;

/// Upper bound for Manhattan distance. A rough empirical estimate, not a true maximum.
pub const DEFAULT_MANHATTAN_MAX: f64 = 100.0;

/// Presentation scale for the final score (`final * scale`).
pub const DEFAULT_SCALE_OUT_OF: f64 = 5.0;

/// Decimal places kept when reporting scores.
pub const SCORE_DECIMALS: i32 = 4;

/// Maximum sentences allowed in either answer.
pub const DEFAULT_MAX_SENTENCES: usize = 3;

/// Candidates with fewer words than this get a short-answer advisory.
pub const DEFAULT_MIN_WORDS: usize = 3;

/// Model id used when a request does not name one.
pub const DEFAULT_MODEL_ID: &str = "all-MiniLM-L6-v2";

/// Output dimension of the MiniLM family (also used by the stub embedder).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the encoder.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Deadline for one embedding + scoring pass, in milliseconds.
pub const DEFAULT_EMBED_TIMEOUT_MS: u64 = 5_000;

/// Number of loaded models kept by the registry.
pub const DEFAULT_MODEL_CACHE_CAPACITY: u64 = 8;

/// Sentence-transformer checkpoints advertised by `GET /v1/methods`.
pub const KNOWN_MODEL_IDS: &[&str] = &[
    "all-MiniLM-L6-v2",
    "all-MiniLM-L12-v2",
    "paraphrase-MiniLM-L6-v2",
    "pritamdeka/BioBERT-mnli-snli-scinli-scitail-mednli-stsb",
    "pritamdeka/S-PubMedBERT-MS-MARCO",
];
