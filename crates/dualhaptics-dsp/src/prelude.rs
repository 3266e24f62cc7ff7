//! Prelude for the DSP crate.
//!
//! # Example
//!
//! ```
//! use dualhaptics_dsp::prelude::*;
//!
//! let mut filter = SampleFilter::new(0.95);
//! let (l, r) = filter.apply(0.2, -0.2);
//! assert!(l.is_finite() && r.is_finite());
//! filter.reset();
//! ```

pub use crate::CHANNELS;
pub use crate::accumulator::BlockAccumulator;
pub use crate::filter::{FilterState, SampleFilter};
pub use crate::resample::{
    BT_HAPTIC_RATE_HZ, RESAMPLE_INPUT_FRAMES, RESAMPLE_INPUT_SAMPLES, RESAMPLE_OUTPUT_FRAMES,
    RESAMPLE_OUTPUT_SAMPLES, SOURCE_RATE_HZ, interpolation_point, resample_block,
};
