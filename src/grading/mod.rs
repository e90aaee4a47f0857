//! End-to-end grading: validate, embed, compare, normalize, penalize, label.
//!
//! [`grade`] is the pure pipeline. [`Grader`] bundles it with an owned embedder and a
//! validated [`ScoringConfig`](crate::scoring::ScoringConfig), and
//! [`grade_with_timeout`] runs a grader off the async runtime under a deadline.
//!
//! Any error aborts the whole request; there are no partial reports.

pub mod error;
pub mod grader;
pub mod types;


pub use error::GradingError;
pub use grader::{Grader, grade, grade_with_timeout};
pub use types::{GradeReport, GradeRequest};
