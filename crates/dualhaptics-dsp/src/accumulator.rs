//! Resample Window Accumulator
//!
//! Audio arrives in blocks of whatever size the source delivers. The
//! resampler only runs on full windows of [`RESAMPLE_INPUT_SAMPLES`]
//! interleaved samples, so the accumulator buffers input until a window is
//! complete and keeps any remainder for the next block.
//!
//! Invariants:
//! - the buffered length is always a multiple of two (whole stereo frames)
//! - windows are handed out in arrival order, exactly one window per pop
//! - a partial remainder is never discarded

use dualhaptics_errors::ValidationError;

use crate::CHANNELS;
use crate::resample::RESAMPLE_INPUT_SAMPLES;

/// Growable buffer of interleaved samples awaiting a full resample window.
///
/// # RT Safety
///
/// Reserve capacity up front with [`with_capacity_blocks`](Self::with_capacity_blocks).
/// Pushes that stay within the reservation never allocate.
#[derive(Debug, Clone, Default)]
pub struct BlockAccumulator {
    samples: Vec<f32>,
}

impl BlockAccumulator {
    /// Create an empty accumulator with no reserved capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accumulator with room for `blocks` full windows.
    pub fn with_capacity_blocks(blocks: usize) -> Self {
        Self {
            samples: Vec::with_capacity(blocks.saturating_mul(RESAMPLE_INPUT_SAMPLES)),
        }
    }

    /// Append interleaved stereo samples.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OddSampleCount`] when `samples` does not hold
    /// whole stereo frames. Nothing is appended in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use dualhaptics_dsp::BlockAccumulator;
    ///
    /// let mut acc = BlockAccumulator::new();
    /// assert!(acc.push(&[0.0; 2047]).is_err());
    /// assert!(acc.is_empty());
    /// assert!(acc.push(&[0.0; 2048]).is_ok());
    /// assert!(acc.has_block());
    /// ```
    pub fn push(&mut self, samples: &[f32]) -> Result<(), ValidationError> {
        if !samples.len().is_multiple_of(CHANNELS) {
            return Err(ValidationError::odd_sample_count(samples.len()));
        }
        self.samples.extend_from_slice(samples);
        Ok(())
    }

    /// Whether at least one full window is buffered.
    pub fn has_block(&self) -> bool {
        self.samples.len() >= RESAMPLE_INPUT_SAMPLES
    }

    /// Move the oldest full window into `out`.
    ///
    /// Returns `false` and leaves `out` untouched when less than a window is
    /// buffered.
    pub fn pop_block(&mut self, out: &mut [f32; RESAMPLE_INPUT_SAMPLES]) -> bool {
        let Some(window) = self.samples.get(..RESAMPLE_INPUT_SAMPLES) else {
            return false;
        };
        out.copy_from_slice(window);
        self.samples.drain(..RESAMPLE_INPUT_SAMPLES);
        true
    }

    /// Number of buffered samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Reserved capacity in samples.
    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    /// Discard all buffered samples, keeping the allocation.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_push_rejected_without_side_effects() {
        let mut acc = BlockAccumulator::new();
        assert!(acc.push(&[0.1, 0.2]).is_ok());

        let err = acc.push(&[0.0; 2047]);
        assert_eq!(err, Err(ValidationError::odd_sample_count(2047)));
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn test_exactly_one_window() {
        let mut acc = BlockAccumulator::new();
        let mut window = [0.0f32; RESAMPLE_INPUT_SAMPLES];
        assert!(acc.push(&[0.5; RESAMPLE_INPUT_SAMPLES]).is_ok());

        assert!(acc.pop_block(&mut window));
        assert!(!acc.pop_block(&mut window));
        assert!(acc.is_empty());
        assert!(window.iter().all(|s| (s - 0.5).abs() < f32::EPSILON));
    }

    #[test]
    fn test_remainder_is_kept_in_order() {
        let mut acc = BlockAccumulator::new();
        let input: Vec<f32> = (0..RESAMPLE_INPUT_SAMPLES + 6).map(|i| i as f32).collect();
        assert!(acc.push(&input).is_ok());

        let mut window = [0.0f32; RESAMPLE_INPUT_SAMPLES];
        assert!(acc.pop_block(&mut window));
        assert_eq!(acc.len(), 6);

        assert!(acc.push(&[-1.0; RESAMPLE_INPUT_SAMPLES - 6]).is_ok());
        assert!(acc.pop_block(&mut window));
        assert!((window[0] - RESAMPLE_INPUT_SAMPLES as f32).abs() < f32::EPSILON);
        assert!((window[6] + 1.0).abs() < f32::EPSILON);
        assert!(acc.is_empty());
    }

    #[test]
    fn test_reserved_capacity() {
        let acc = BlockAccumulator::with_capacity_blocks(3);
        assert!(acc.capacity() >= 3 * RESAMPLE_INPUT_SAMPLES);
    }

    #[test]
    fn test_clear() {
        let mut acc = BlockAccumulator::with_capacity_blocks(1);
        assert!(acc.push(&[1.0; 10]).is_ok());
        acc.clear();
        assert!(acc.is_empty());
        assert!(!acc.has_block());
    }
}
