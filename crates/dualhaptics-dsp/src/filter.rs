//! Residual Sample Filter
//!
//! A single-pole filter that tracks the slow component of each channel and
//! emits the residual:
//!
//! ```text
//! state  = (1 - alpha) * input + alpha * state
//! output = clamp(input - state, -1.0, 1.0)
//! ```
//!
//! With `alpha = 1.0` the state never leaves zero and the filter is a
//! clamping pass-through. That configuration is the default for every
//! connection mode and must stay bit-exact.

/// Common interface for resettable filter state.
pub trait FilterState: Copy + Clone + std::fmt::Debug {
    /// Reset the filter state to initial values.
    fn reset(&mut self);
}

/// Per-session stereo filter state.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
/// - O(1) per frame
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct SampleFilter {
    /// Filter coefficient in `[0.0, 1.0]`
    pub alpha: f32,
    /// Left channel state
    pub left: f32,
    /// Right channel state
    pub right: f32,
}

impl SampleFilter {
    /// Create a filter with the given coefficient and zeroed state.
    ///
    /// # Example
    ///
    /// ```
    /// use dualhaptics_dsp::SampleFilter;
    ///
    /// let filter = SampleFilter::new(0.9);
    /// assert!((filter.alpha - 0.9).abs() < f32::EPSILON);
    /// assert!(filter.left.abs() < f32::EPSILON);
    /// ```
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            left: 0.0,
            right: 0.0,
        }
    }

    /// Create a pass-through filter (`alpha = 1.0`).
    pub fn bypass() -> Self {
        Self::new(1.0)
    }

    /// Filter one stereo frame, updating the channel state.
    ///
    /// # Example
    ///
    /// ```
    /// use dualhaptics_dsp::SampleFilter;
    ///
    /// let mut filter = SampleFilter::bypass();
    /// let (l, r) = filter.apply(0.5, 1.5);
    /// assert!((l - 0.5).abs() < f32::EPSILON);
    /// assert!((r - 1.0).abs() < f32::EPSILON);
    /// ```
    #[inline]
    pub fn apply(&mut self, left: f32, right: f32) -> (f32, f32) {
        (
            residual(left, &mut self.left, self.alpha),
            residual(right, &mut self.right, self.alpha),
        )
    }

    /// Filter an interleaved L/R block in place.
    ///
    /// A trailing unpaired sample is left untouched.
    #[inline]
    pub fn apply_interleaved(&mut self, samples: &mut [f32]) {
        for frame in samples.chunks_exact_mut(2) {
            if let [left, right] = frame {
                let (l, r) = self.apply(*left, *right);
                *left = l;
                *right = r;
            }
        }
    }

    /// Whether this filter leaves in-range input unchanged.
    pub fn is_bypass(&self) -> bool {
        (self.alpha - 1.0).abs() < f32::EPSILON
    }
}

impl Default for SampleFilter {
    fn default() -> Self {
        Self::bypass()
    }
}

impl FilterState for SampleFilter {
    fn reset(&mut self) {
        self.left = 0.0;
        self.right = 0.0;
    }
}

#[inline]
fn residual(input: f32, state: &mut f32, alpha: f32) -> f32 {
    *state = (1.0 - alpha) * input + alpha * *state;
    (input - *state).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bypass_passes_through() {
        let mut filter = SampleFilter::bypass();
        for &x in &[-1.0f32, -0.3, 0.0, 0.42, 1.0] {
            let (l, r) = filter.apply(x, -x);
            assert!((l - x).abs() < f32::EPSILON);
            assert!((r + x).abs() < f32::EPSILON);
        }
        assert!(filter.left.abs() < f32::EPSILON);
        assert!(filter.right.abs() < f32::EPSILON);
    }

    #[test]
    fn test_bypass_clamps() {
        let mut filter = SampleFilter::bypass();
        let (l, r) = filter.apply(3.0, -7.5);
        assert!((l - 1.0).abs() < f32::EPSILON);
        assert!((r + 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_alpha_removes_everything() {
        let mut filter = SampleFilter::new(0.0);
        let (l, r) = filter.apply(0.8, -0.2);
        assert!(l.abs() < f32::EPSILON);
        assert!(r.abs() < f32::EPSILON);
    }

    #[test]
    fn test_dc_input_decays() {
        let mut filter = SampleFilter::new(0.5);
        let (first, _) = filter.apply(1.0, 0.0);
        assert!((first - 0.5).abs() < 1e-6);

        let mut last = first;
        for _ in 0..64 {
            last = filter.apply(1.0, 0.0).0;
        }
        assert!(last < 1e-6, "DC residual should vanish, got {last}");
    }

    #[test]
    fn test_channels_are_independent() {
        let mut filter = SampleFilter::new(0.5);
        filter.apply(1.0, 0.0);
        assert!((filter.left - 0.5).abs() < 1e-6);
        assert!(filter.right.abs() < f32::EPSILON);
    }

    #[test]
    fn test_reset() {
        let mut filter = SampleFilter::new(0.5);
        filter.apply(1.0, -1.0);
        filter.reset();
        assert!(filter.left.abs() < f32::EPSILON);
        assert!(filter.right.abs() < f32::EPSILON);
        assert!((filter.alpha - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_interleaved_skips_trailing_sample() {
        let mut filter = SampleFilter::new(0.0);
        let mut block = [0.5f32, 0.5, 0.5];
        filter.apply_interleaved(&mut block);
        assert!(block[0].abs() < f32::EPSILON);
        assert!(block[1].abs() < f32::EPSILON);
        assert!((block[2] - 0.5).abs() < f32::EPSILON);
    }
}
