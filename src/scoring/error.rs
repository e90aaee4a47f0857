use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("invalid scoring configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("failed to parse {name}='{value}': {reason}")]
    InvalidEnvValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}
