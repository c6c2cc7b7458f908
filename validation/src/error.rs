//! Validation error types.

use crate::outcome::VerifyOutcome;
use thiserror::Error;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised by validation.
///
/// Rules themselves never fail; a report only becomes an error when a caller
/// asks for it to be raised.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{} validation failure(s): {}", .failures.len(), summarize(.failures))]
    Aggregate { failures: Vec<VerifyOutcome> },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl ValidationError {
    pub fn aggregate(failures: Vec<VerifyOutcome>) -> Self {
        Self::Aggregate { failures }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// The failed outcomes carried by an aggregate error.
    pub fn failures(&self) -> &[VerifyOutcome] {
        match self {
            Self::Aggregate { failures } => failures,
            Self::InvalidArgument { .. } => &[],
        }
    }
}

fn summarize(failures: &[VerifyOutcome]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
