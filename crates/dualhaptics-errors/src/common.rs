//! Top-level error type and classification shared by all dualhaptics crates.

use core::fmt;

use crate::{DeviceError, SourceError, ValidationError};

/// Top-level error type wrapping every dualhaptics sub-error.
#[derive(Debug, thiserror::Error)]
pub enum HapticsError {
    /// Controller connection and write-path errors
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// Audio source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Validation and configuration errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Operation not permitted in the current session state
    #[error("Invalid session state: expected {expected}, found {actual}")]
    InvalidState {
        /// State required by the operation
        expected: String,
        /// State the session was actually in
        actual: String,
    },

    /// Producer thread could not be spawned
    #[error("Failed to spawn producer thread: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// I/O errors outside the device path (configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HapticsError {
    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HapticsError::Device(e) => e.severity(),
            HapticsError::Source(e) => e.severity(),
            HapticsError::Validation(e) => e.severity(),
            HapticsError::InvalidState { .. } => ErrorSeverity::Warning,
            HapticsError::SpawnFailed(_) => ErrorSeverity::Critical,
            HapticsError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Check if this error stems from how the session was set up rather than
    /// from a failure while streaming.
    ///
    /// Configuration errors are returned synchronously from session start and
    /// leave the session idle.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            HapticsError::Device(e) => e.is_device_unavailable(),
            HapticsError::Source(e) => e.is_unavailable(),
            HapticsError::Validation(_)
            | HapticsError::InvalidState { .. }
            | HapticsError::Io(_) => true,
            HapticsError::SpawnFailed(_) => false,
        }
    }

    /// Check if this error is recoverable.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// Create an invalid state error.
    pub fn invalid_state(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        HapticsError::InvalidState {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, the pipeline cannot continue
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
