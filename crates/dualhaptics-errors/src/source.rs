//! Audio source error types.

use crate::common::ErrorSeverity;

/// Errors raised by an audio source binding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Source could not be opened
    #[error("Audio source unavailable: {0}")]
    Unavailable(String),

    /// Audio endpoint is already claimed by another session
    #[error("Audio endpoint '{0}' is already in use")]
    EndpointBusy(String),

    /// Decoding or capture failed mid-stream
    #[error("Audio read failed: {0}")]
    ReadFailed(String),
}

impl SourceError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SourceError::Unavailable(_) => ErrorSeverity::Error,
            SourceError::EndpointBusy(_) => ErrorSeverity::Warning,
            SourceError::ReadFailed(_) => ErrorSeverity::Warning,
        }
    }

    /// Check if the source could not be bound at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            SourceError::Unavailable(_) | SourceError::EndpointBusy(_)
        )
    }

    /// Create an unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        SourceError::Unavailable(reason.into())
    }

    /// Create an endpoint busy error.
    pub fn endpoint_busy(endpoint: impl Into<String>) -> Self {
        SourceError::EndpointBusy(endpoint.into())
    }

    /// Create a read failed error.
    pub fn read_failed(reason: impl Into<String>) -> Self {
        SourceError::ReadFailed(reason.into())
    }
}
