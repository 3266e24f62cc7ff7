//! Interleaved stereo audio at 48 kHz.

use std::f64::consts::TAU;

/// Source rate every fixture is generated at.
pub const FIXTURE_RATE_HZ: f64 = 48_000.0;

/// `frames` stereo frames of a sine, identical on both channels.
pub fn sine_interleaved(frequency_hz: f64, amplitude: f32, frames: usize) -> Vec<f32> {
    (0..frames)
        .flat_map(|n| {
            let s = ((TAU * frequency_hz * n as f64 / FIXTURE_RATE_HZ).sin() as f32) * amplitude;
            [s, s]
        })
        .collect()
}

/// Value of [`sine_interleaved`] at source frame `n`.
pub fn sine_at(frequency_hz: f64, amplitude: f32, n: usize) -> f32 {
    ((TAU * frequency_hz * n as f64 / FIXTURE_RATE_HZ).sin() as f32) * amplitude
}

/// `frames` stereo frames of silence.
pub fn silence_interleaved(frames: usize) -> Vec<f32> {
    vec![0.0; frames * 2]
}

/// `frames` stereo frames holding constant left and right levels.
pub fn constant_interleaved(left: f32, right: f32, frames: usize) -> Vec<f32> {
    (0..frames).flat_map(|_| [left, right]).collect()
}
