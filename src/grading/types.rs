use serde::{Deserialize, Serialize};

use crate::scoring::Label;
use crate::similarity::SimilarityMethod;
use crate::text::{Advisory, TextMetrics};

/// One answer to grade against its reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRequest {
    pub reference: String,
    pub candidate: String,
    #[serde(default)]
    pub method: SimilarityMethod,
    /// Optional question text, echoed back in the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl GradeRequest {
    pub fn new<R: Into<String>, C: Into<String>>(
        reference: R,
        candidate: C,
        method: SimilarityMethod,
    ) -> Self {
        Self {
            reference: reference.into(),
            candidate: candidate.into(),
            method,
            question: None,
        }
    }

    pub fn with_question<Q: Into<String>>(mut self, question: Q) -> Self {
        self.question = Some(question.into());
        self
    }
}

/// Everything reported for one graded answer.
///
/// Scores are rounded to four decimals; `label` is derived from the rounded
/// `final_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub method: SimilarityMethod,
    /// Embedding model used, `None` for lexical methods.
    pub model_id: Option<String>,
    pub raw_similarity: f64,
    pub normalized_score: f64,
    pub missing_keywords: Vec<String>,
    pub missing_count: usize,
    pub total_keywords: usize,
    pub penalty: f64,
    pub final_score: f64,
    pub scaled_score: f64,
    pub scale_out_of: f64,
    pub label: Label,
    pub feedback: String,
    pub advisories: Vec<Advisory>,
    pub reference_metrics: TextMetrics,
    pub candidate_metrics: TextMetrics,
}

impl GradeReport {
    /// Missing keywords as a display string (`"None"` when complete).
    pub fn missing_keywords_display(&self) -> String {
        if self.missing_keywords.is_empty() {
            "None".to_string()
        } else {
            self.missing_keywords.join(", ")
        }
    }
}

impl std::fmt::Display for GradeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Similarity method: {}", self.method)?;
        if let Some(model_id) = &self.model_id {
            writeln!(f, "Embedding model: {}", model_id)?;
        }
        writeln!(
            f,
            "Normalized score (pre-penalty): {:.4}",
            self.normalized_score
        )?;
        writeln!(
            f,
            "Missing keywords ({}/{}): {}",
            self.missing_count,
            self.total_keywords,
            self.missing_keywords_display()
        )?;
        writeln!(f, "Final score (after penalty): {:.4}", self.final_score)?;
        writeln!(
            f,
            "Grade: {} / {} ({})",
            self.scaled_score, self.scale_out_of, self.label
        )?;
        write!(f, "{}", self.feedback)?;
        for advisory in &self.advisories {
            write!(f, "\nNote: {}", advisory)?;
        }
        Ok(())
    }
}
