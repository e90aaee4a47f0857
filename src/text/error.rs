use thiserror::Error;

use super::TextRole;

/// Why an answer pair was refused before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Text is empty or whitespace-only.
    #[error("{role} answer is required but was empty")]
    Empty { role: TextRole },

    /// Text has more sentences than allowed.
    #[error("{role} exceeds {limit} sentences (found {sentences})")]
    TooManySentences {
        role: TextRole,
        sentences: usize,
        limit: usize,
    },
}

impl ValidationError {
    /// The side of the comparison that violated the constraint.
    pub fn role(&self) -> TextRole {
        match self {
            ValidationError::Empty { role } | ValidationError::TooManySentences { role, .. } => {
                *role
            }
        }
    }
}
