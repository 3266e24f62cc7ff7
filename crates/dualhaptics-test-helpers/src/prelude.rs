//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use dualhaptics_test_helpers::prelude::*;
//! ```

pub use crate::assertions::{
    assert_silent_packets, assert_silent_samples, packets_from_writes, samples_from_usb_write,
};
pub use crate::fixtures::{constant_interleaved, silence_interleaved, sine_at, sine_interleaved};
pub use crate::must::{must, must_some, must_wait_until, must_with, wait_until};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
