use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use super::error::GradingError;
use super::types::{GradeReport, GradeRequest};
use crate::embedding::{Embedder, EmbeddingError};
use crate::scoring::{KeywordGap, ScoreBreakdown, ScoringConfig, normalize, round_score};
use crate::similarity::{SimilarityError, SimilarityMethod, raw_similarity};
use crate::text::validate_pair;

/// Grades one request with `embedder` and `config`.
///
/// Lexical methods never call the embedder. Embedding methods encode reference and
/// candidate in a single batch and fail with `MissingEmbeddings` when `embedder` is `None`.
#[instrument(skip_all, fields(method = %request.method))]
pub fn grade(
    request: &GradeRequest,
    embedder: Option<&dyn Embedder>,
    config: &ScoringConfig,
) -> Result<GradeReport, GradingError> {
    let GradeRequest {
        reference,
        candidate,
        method,
        question,
    } = request;
    let method = *method;

    let validated = validate_pair(reference, candidate, &config.limits)?;

    let (raw, model_id) = if method.uses_embeddings() {
        let embedder = embedder.ok_or(SimilarityError::MissingEmbeddings { method })?;
        let vectors = embedder.encode_batch(&[reference.as_str(), candidate.as_str()])?;
        let [reference_vec, candidate_vec] = vectors.as_slice() else {
            return Err(EmbeddingError::BatchSizeMismatch {
                expected: 2,
                actual: vectors.len(),
            }
            .into());
        };

        debug!(
            model_id = embedder.model_id(),
            dim = reference_vec.len(),
            "Encoded reference and candidate"
        );

        let raw = raw_similarity(
            method,
            reference,
            candidate,
            Some((reference_vec.as_slice(), candidate_vec.as_slice())),
        )?;
        (raw, Some(embedder.model_id().to_string()))
    } else {
        (raw_similarity(method, reference, candidate, None)?, None)
    };

    let normalized = normalize(method, raw, &config.bounds);
    let gap = KeywordGap::analyze(reference, candidate);
    let breakdown = ScoreBreakdown::compute(normalized, &gap, config);

    info!(
        raw = raw,
        normalized = breakdown.normalized_score,
        missing = gap.missing_count,
        total = gap.total_keywords,
        final_score = breakdown.final_score,
        label = %breakdown.label,
        "Graded answer"
    );

    Ok(GradeReport {
        question: question.clone(),
        method,
        model_id,
        raw_similarity: round_score(raw),
        normalized_score: breakdown.normalized_score,
        missing_count: gap.missing_count,
        total_keywords: gap.total_keywords,
        missing_keywords: gap.missing,
        penalty: breakdown.penalty,
        final_score: breakdown.final_score,
        scaled_score: breakdown.scaled_score,
        scale_out_of: breakdown.scale_out_of,
        label: breakdown.label,
        feedback: breakdown.label.feedback().to_string(),
        advisories: validated.advisories,
        reference_metrics: validated.reference,
        candidate_metrics: validated.candidate,
    })
}

/// A grading pipeline bound to one embedder and one validated configuration.
///
/// Cheap to share behind `Arc`; grading calls hold no mutable state.
#[derive(Debug, Clone)]
pub struct Grader {
    embedder: Option<Arc<dyn Embedder>>,
    config: ScoringConfig,
}

impl Grader {
    pub fn new(embedder: Arc<dyn Embedder>, config: ScoringConfig) -> Result<Self, GradingError> {
        config.validate()?;
        Ok(Self {
            embedder: Some(embedder),
            config,
        })
    }

    /// A grader without an embedder. Only Jaccard and Levenshtein succeed.
    pub fn lexical(config: ScoringConfig) -> Result<Self, GradingError> {
        config.validate()?;
        Ok(Self {
            embedder: None,
            config,
        })
    }

    pub fn embedder(&self) -> Option<&Arc<dyn Embedder>> {
        self.embedder.as_ref()
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn grade(&self, request: &GradeRequest) -> Result<GradeReport, GradingError> {
        grade(request, self.embedder.as_deref(), &self.config)
    }

    /// Convenience wrapper over [`Grader::grade`] for plain strings.
    pub fn grade_texts(
        &self,
        reference: &str,
        candidate: &str,
        method: SimilarityMethod,
    ) -> Result<GradeReport, GradingError> {
        self.grade(&GradeRequest::new(reference, candidate, method))
    }
}

/// Runs `grader` on the blocking pool and gives up after `timeout`.
///
/// On timeout the blocking task is left to finish in the background and its result is
/// discarded.
pub async fn grade_with_timeout(
    grader: Arc<Grader>,
    request: GradeRequest,
    timeout: Duration,
) -> Result<GradeReport, GradingError> {
    let task = tokio::task::spawn_blocking(move || grader.grade(&request));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(GradingError::TaskFailed {
            reason: join_err.to_string(),
        }),
        Err(_) => Err(GradingError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}
