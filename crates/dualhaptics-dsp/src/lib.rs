//! RT-Safe DSP Stages for Controller Haptics
//!
//! This crate provides the signal processing blocks that turn a 48 kHz
//! interleaved stereo float stream into samples ready for haptic packet
//! encoding.
//!
//! # Overview
//!
//! - **Sample filter**: Single-pole residual filter with per-channel state
//! - **Resampler**: Fixed-ratio linear interpolation from 48 kHz to 3 kHz
//! - **Accumulator**: Collects arbitrary-size blocks into full resample windows
//!
//! # RT Safety Guarantees
//!
//! - No heap allocations in the filter or resampler
//! - The accumulator allocates only when its reserved capacity is exceeded
//! - Bounded execution time per block
//! - No syscalls or I/O
//!
//! # Example
//!
//! ```
//! use dualhaptics_dsp::prelude::*;
//!
//! let mut accumulator = BlockAccumulator::with_capacity_blocks(2);
//! let mut filter = SampleFilter::bypass();
//! let mut window = [0.0f32; RESAMPLE_INPUT_SAMPLES];
//!
//! accumulator.push(&[0.25; RESAMPLE_INPUT_SAMPLES])?;
//! while accumulator.pop_block(&mut window) {
//!     let mut resampled = resample_block(&window);
//!     filter.apply_interleaved(&mut resampled);
//!     assert_eq!(resampled.len(), RESAMPLE_OUTPUT_SAMPLES);
//! }
//! assert!(accumulator.is_empty());
//! # Ok::<(), dualhaptics_errors::ValidationError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod accumulator;
pub mod filter;
pub mod prelude;
pub mod resample;

pub use accumulator::BlockAccumulator;
pub use filter::{FilterState, SampleFilter};
pub use resample::{
    BT_HAPTIC_RATE_HZ, RESAMPLE_INPUT_FRAMES, RESAMPLE_INPUT_SAMPLES, RESAMPLE_OUTPUT_FRAMES,
    RESAMPLE_OUTPUT_SAMPLES, SOURCE_RATE_HZ, interpolation_point, resample_block,
};

/// Number of interleaved channels in every block handled by this crate.
pub const CHANNELS: usize = 2;
