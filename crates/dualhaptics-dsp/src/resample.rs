//! Fixed-Ratio Linear Resampler
//!
//! Converts one window of 1024 interleaved stereo frames at 48 kHz into 64
//! stereo frames at the 3 kHz Bluetooth haptic rate.
//!
//! For output frame `o` the source position is `p = o / R` with
//! `R = 3000 / 48000`. The integer part selects the left neighbour and the
//! fractional part weights the right one. Positions at or past the last
//! input frame are pinned to the final pair with `frac = 1.0`, so the
//! interpolation never reads beyond the window.
//!
//! # RT Safety
//!
//! - Fixed-size arrays in and out, no allocation
//! - Integer position arithmetic, no float-to-index casts

/// Sample rate of the incoming audio stream.
pub const SOURCE_RATE_HZ: u32 = 48_000;

/// Native haptic sample rate of the Bluetooth transport.
pub const BT_HAPTIC_RATE_HZ: u32 = 3_000;

/// Stereo frames consumed per resample cycle.
pub const RESAMPLE_INPUT_FRAMES: usize = 1024;

/// Interleaved samples consumed per resample cycle.
pub const RESAMPLE_INPUT_SAMPLES: usize = RESAMPLE_INPUT_FRAMES * 2;

/// Stereo frames produced per resample cycle.
pub const RESAMPLE_OUTPUT_FRAMES: usize = 64;

/// Interleaved samples produced per resample cycle.
pub const RESAMPLE_OUTPUT_SAMPLES: usize = RESAMPLE_OUTPUT_FRAMES * 2;

/// Compute the source frame index and interpolation weight for an output frame.
///
/// Positions are computed exactly from the rate pair. The returned index is
/// always at most `input_frames - 2` so that `index + 1` is a valid frame.
///
/// # Example
///
/// ```
/// use dualhaptics_dsp::interpolation_point;
///
/// assert_eq!(interpolation_point(3, 48_000, 3_000, 1024), (48, 0.0));
/// // Past the end: pinned to the last pair.
/// assert_eq!(interpolation_point(100, 48_000, 3_000, 1024), (1022, 1.0));
/// ```
pub fn interpolation_point(
    out_frame: usize,
    source_rate: u32,
    target_rate: u32,
    input_frames: usize,
) -> (usize, f32) {
    let last = input_frames.saturating_sub(1);
    if target_rate == 0 || last == 0 {
        return (0, 0.0);
    }

    let scaled = out_frame.saturating_mul(source_rate as usize);
    let target = target_rate as usize;
    let index = scaled / target;

    if index >= last {
        return (last - 1, 1.0);
    }

    let frac = (scaled % target) as f32 / target as f32;
    (index, frac)
}

/// Resample one full window of interleaved stereo samples.
///
/// # Example
///
/// ```
/// use dualhaptics_dsp::{RESAMPLE_INPUT_SAMPLES, resample_block};
///
/// let window = [0.5f32; RESAMPLE_INPUT_SAMPLES];
/// let out = resample_block(&window);
/// assert!(out.iter().all(|s| (s - 0.5).abs() < f32::EPSILON));
/// ```
pub fn resample_block(input: &[f32; RESAMPLE_INPUT_SAMPLES]) -> [f32; RESAMPLE_OUTPUT_SAMPLES] {
    let mut output = [0.0f32; RESAMPLE_OUTPUT_SAMPLES];

    for (out_frame, frame) in output.chunks_exact_mut(2).enumerate() {
        let (index, frac) = interpolation_point(
            out_frame,
            SOURCE_RATE_HZ,
            BT_HAPTIC_RATE_HZ,
            RESAMPLE_INPUT_FRAMES,
        );
        let base = index * 2;
        let (Some(a), Some(b)) = (input.get(base..base + 2), input.get(base + 2..base + 4)) else {
            continue;
        };
        if let ([l0, r0], [l1, r1], [left, right]) = (a, b, frame) {
            *left = lerp(*l0, *l1, frac);
            *right = lerp(*r0, *r1, frac);
        }
    }

    output
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_positions_are_exact() {
        for out_frame in 0..RESAMPLE_OUTPUT_FRAMES {
            let (index, frac) = interpolation_point(
                out_frame,
                SOURCE_RATE_HZ,
                BT_HAPTIC_RATE_HZ,
                RESAMPLE_INPUT_FRAMES,
            );
            assert_eq!(index, out_frame * 16);
            assert!(frac.abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_fractional_position() {
        let (index, frac) = interpolation_point(1, 3, 2, 10);
        assert_eq!(index, 1);
        assert!((frac - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clamp_at_last_frame() {
        let (index, frac) = interpolation_point(1023, 1, 1, 1024);
        assert_eq!(index, 1022);
        assert!((frac - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(interpolation_point(5, 48_000, 0, 1024), (0, 0.0));
        assert_eq!(interpolation_point(5, 48_000, 3_000, 1), (0, 0.0));
    }

    #[test]
    fn test_picks_every_sixteenth_frame() {
        let mut window = [0.0f32; RESAMPLE_INPUT_SAMPLES];
        for (i, frame) in window.chunks_exact_mut(2).enumerate() {
            frame[0] = i as f32 / 1024.0;
            frame[1] = -(i as f32) / 1024.0;
        }

        let out = resample_block(&window);
        for (o, frame) in out.chunks_exact(2).enumerate() {
            let expected = (o * 16) as f32 / 1024.0;
            assert!((frame[0] - expected).abs() < 1e-6);
            assert!((frame[1] + expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_silence_stays_silent() {
        let out = resample_block(&[0.0; RESAMPLE_INPUT_SAMPLES]);
        assert!(out.iter().all(|s| s.abs() < f32::EPSILON));
    }
}
