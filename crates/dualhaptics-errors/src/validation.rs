//! Input validation error types.
//!
//! Raised for malformed sample blocks handed to the DSP stages and for
//! out-of-range configuration values.

use core::fmt;

use crate::common::ErrorSeverity;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Interleaved stereo input with an odd sample count
    #[error("Interleaved stereo block has odd sample count {len}")]
    OddSampleCount {
        /// Number of samples offered
        len: usize,
    },

    /// Value out of range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: String,
        /// The invalid value
        value: String,
        /// Minimum allowed value
        min: String,
        /// Maximum allowed value
        max: String,
    },

    /// Value is not acceptable for the field
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason the value was rejected
        reason: String,
    },

    /// Configuration document failed to parse
    #[error("Failed to parse {format} configuration: {message}")]
    Parse {
        /// Document format (yaml, json)
        format: String,
        /// Parser message
        message: String,
    },
}

impl ValidationError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Create an odd sample count error.
    pub fn odd_sample_count(len: usize) -> Self {
        ValidationError::OddSampleCount { len }
    }

    /// Create an out of range error.
    pub fn out_of_range<T: fmt::Debug>(field: impl Into<String>, value: T, min: T, max: T) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            value: format!("{value:?}"),
            min: format!("{min:?}"),
            max: format!("{max:?}"),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(format: impl Into<String>, message: impl fmt::Display) -> Self {
        ValidationError::Parse {
            format: format.into(),
            message: message.to_string(),
        }
    }
}
