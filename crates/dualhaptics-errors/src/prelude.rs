//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use dualhaptics_errors::prelude::*;
//! use dualhaptics_errors::validate;
//!
//! fn require_even(len: usize) -> Result<usize> {
//!     validate!(len.is_multiple_of(2), ValidationError::odd_sample_count(len));
//!     Ok(len / 2)
//! }
//!
//! assert!(require_even(2048).is_ok());
//! assert!(require_even(2047).is_err());
//! ```

pub use crate::{
    Result,
    common::{ErrorSeverity, HapticsError},
    device::DeviceError,
    source::SourceError,
    validation::ValidationError,
};

/// Return early with an error when a condition does not hold.
#[macro_export]
macro_rules! validate {
    ($condition:expr, $error:expr) => {
        if !$condition {
            return Err($error.into());
        }
    };
}

/// Return early with an out of range validation error.
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $value:expr, $min:expr, $max:expr) => {
        if !($value >= $min && $value <= $max) {
            return Err($crate::ValidationError::out_of_range($field, $value, $min, $max).into());
        }
    };
}
