//! Centralized error types for dualhaptics
//!
//! This crate provides the error handling vocabulary shared by every crate in
//! the audio-to-haptics pipeline, from the DSP blocks up to the session
//! manager and the command line tool.
//!
//! # Architecture
//!
//! - [`common`]: Top-level [`HapticsError`] and severity classification
//! - [`device`]: Controller connection and write-path errors
//! - [`source`]: Audio source and endpoint errors
//! - [`validation`]: Input and configuration validation errors
//!
//! # Error Taxonomy
//!
//! - Configuration errors (no source, device not connected) are returned
//!   synchronously from session start and leave the session idle.
//! - Transient source errors end the stream and are logged, never surfaced
//!   as hard failures.
//! - Transport errors on the write path are counted and dropped.
//!
//! # Example
//!
//! ```
//! use dualhaptics_errors::prelude::*;
//!
//! fn check_alpha(alpha: f32) -> Result<f32> {
//!     if !(0.0..=1.0).contains(&alpha) {
//!         return Err(ValidationError::out_of_range("alpha", alpha, 0.0, 1.0).into());
//!     }
//!     Ok(alpha)
//! }
//!
//! assert!(check_alpha(0.5).is_ok());
//! assert!(check_alpha(1.5).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod device;
pub mod prelude;
pub mod source;
pub mod validation;

pub use common::{ErrorSeverity, HapticsError};
pub use device::DeviceError;
pub use source::SourceError;
pub use validation::ValidationError;

/// A specialized `Result` type for dualhaptics operations.
pub type Result<T> = std::result::Result<T, HapticsError>;
