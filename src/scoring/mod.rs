//! Normalization, keyword coverage and final score derivation.
//!
//! The stages are pure functions of their inputs plus a [`ScoringConfig`]:
//!
//! 1. [`normalize`] maps a method's raw value onto `[0, 1]`, higher is better.
//! 2. [`KeywordGap::analyze`] finds reference words the candidate never uses.
//! 3. [`ScoreBreakdown::compute`] subtracts the weighted keyword penalty and picks a
//!    [`Label`].
//!
//! # Distance Bounds
//!
//! Euclidean and Manhattan distances are unbounded in general. They are inverted
//! against [`DistanceBounds`], which are tunable approximations rather than true
//! maxima: a distance past its bound simply normalizes to `0.0`.

pub mod config;
pub mod error;
pub mod keywords;
pub mod normalize;
pub mod scorer;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::{DistanceBounds, LabelThresholds, ScoringConfig};
pub use error::ScoringError;
pub use keywords::KeywordGap;
pub use normalize::normalize;
pub use scorer::{final_score, keyword_penalty, round_score, scale_score};
pub use types::{Label, ScoreBreakdown};
