//! Visitor error types.

use crate::options::TargetKind;
use prism_journal::JournalError;
use prism_registry::{AccessError, RegistryError};
use prism_validation::{ValidationError, VerifyOutcome};
use thiserror::Error;

/// Visitor errors.
#[derive(Debug, Error)]
pub enum VisitorError {
    /// Member access error.
    #[error("access error: {0}")]
    Access(#[from] AccessError),

    /// Type registration error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// History or replay error.
    #[error("journal error: {0}")]
    Journal(#[from] JournalError),

    /// Invalid argument to a public call.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The operation makes no sense for the bound target.
    #[error("{operation} is not supported for a {target} target")]
    UnsupportedTarget {
        operation: &'static str,
        target: TargetKind,
    },
}

impl VisitorError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn unsupported_target(operation: &'static str, target: TargetKind) -> Self {
        Self::UnsupportedTarget { operation, target }
    }

    /// Failed rule outcomes when this is a validation error.
    pub fn failures(&self) -> &[VerifyOutcome] {
        match self {
            Self::Validation(e) => e.failures(),
            _ => &[],
        }
    }
}

/// Result type for visitor operations.
pub type VisitorResult<T> = Result<T, VisitorError>;
