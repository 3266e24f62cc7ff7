//! Shared test utilities for DualHaptics.
//!
//! - [`mod@must`] - Unwrap helpers with `#[track_caller]`
//! - [`assertions`] - Approximate comparison and packet assertions
//! - [`fixtures`] - Interleaved stereo audio builders
//! - [`prelude`] - Convenience re-exports
//!
//! ```rust,ignore
//! use dualhaptics_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic, reason = "test helpers fail loudly")]

pub mod assertions;
pub mod fixtures;
pub mod must;
pub mod prelude;

pub use must::*;
