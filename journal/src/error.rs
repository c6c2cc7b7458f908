//! Journal error types.

use thiserror::Error;

/// Journal errors.
#[derive(Debug, Error)]
pub enum JournalError {
    /// The session cannot replay its history.
    #[error("replay not supported: {reason}")]
    NotSupported { reason: String },

    /// A record could not be applied to the replay target.
    #[error("replay failed at record {seq} ({member}): {source}")]
    Replay {
        seq: u64,
        member: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl JournalError {
    pub fn not_supported(reason: impl Into<String>) -> Self {
        Self::NotSupported {
            reason: reason.into(),
        }
    }

    pub fn replay(
        seq: u64,
        member: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Replay {
            seq,
            member: member.into(),
            source: Box::new(source),
        }
    }
}

/// Result type for journal operations.
pub type JournalResult<T> = Result<T, JournalError>;
