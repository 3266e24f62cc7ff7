//! In-process audio sources.
//!
//! Generators for tests and the demo CLI. Real capture and decoding backends
//! live outside this crate and plug in through [`AudioSource`].

use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use dualhaptics_dsp::SOURCE_RATE_HZ;
use dualhaptics_errors::SourceError;

use crate::ports::{AudioSource, SourceKind};

/// Stereo sine generator at 48 kHz.
///
/// Finite when given a duration, endless otherwise. A paced tone sleeps so
/// that blocks arrive at the real audio rate, like a capture callback.
#[derive(Debug, Clone)]
pub struct ToneSource {
    frequency_hz: f64,
    amplitude: f32,
    total_frames: Option<u64>,
    produced: u64,
    paced: bool,
    next_deadline: Option<Instant>,
    endpoint: Option<String>,
    opened: bool,
}

impl ToneSource {
    /// Endless full-scale tone.
    pub fn new(frequency_hz: f32) -> Self {
        Self {
            frequency_hz: f64::from(frequency_hz),
            amplitude: 1.0,
            total_frames: None,
            produced: 0,
            paced: false,
            next_deadline: None,
            endpoint: None,
            opened: false,
        }
    }

    /// Scale the tone, clamped to `[0.0, 1.0]`.
    #[must_use]
    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude.clamp(0.0, 1.0);
        self
    }

    /// End the stream after `frames` stereo frames.
    #[must_use]
    pub fn with_frames(mut self, frames: u64) -> Self {
        self.total_frames = Some(frames);
        self
    }

    /// End the stream after `duration` of audio.
    #[must_use]
    pub fn with_duration(self, duration: Duration) -> Self {
        let frames = duration.as_micros() * u128::from(SOURCE_RATE_HZ) / 1_000_000;
        self.with_frames(u64::try_from(frames).unwrap_or(u64::MAX))
    }

    /// Deliver blocks no faster than real time.
    #[must_use]
    pub fn paced(mut self, paced: bool) -> Self {
        self.paced = paced;
        self
    }

    /// Report an audio endpoint for exclusive claiming.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Frames generated so far.
    pub fn frames_produced(&self) -> u64 {
        self.produced
    }

    fn sample_at(&self, frame: u64) -> f32 {
        let t = frame as f64 / f64::from(SOURCE_RATE_HZ);
        ((TAU * self.frequency_hz * t).sin() as f32) * self.amplitude
    }

    fn pace(&mut self, frames: usize) {
        let block = Duration::from_secs_f64(frames as f64 / f64::from(SOURCE_RATE_HZ));
        let deadline = self.next_deadline.unwrap_or_else(Instant::now) + block;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        self.next_deadline = Some(deadline);
    }
}

impl AudioSource for ToneSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Synthetic
    }

    fn endpoint_id(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn open(&mut self) -> Result<(), SourceError> {
        if !self.frequency_hz.is_finite() || self.frequency_hz < 0.0 {
            return Err(SourceError::unavailable(format!(
                "invalid tone frequency {}",
                self.frequency_hz
            )));
        }
        self.opened = true;
        self.produced = 0;
        self.next_deadline = None;
        Ok(())
    }

    fn read(&mut self, buf: &mut [f32]) -> Result<usize, SourceError> {
        if !self.opened {
            return Err(SourceError::read_failed("tone source read before open"));
        }

        let mut frames = buf.len() / 2;
        if let Some(total) = self.total_frames {
            let remaining = total.saturating_sub(self.produced);
            frames = frames.min(usize::try_from(remaining).unwrap_or(usize::MAX));
        }
        if frames == 0 {
            return Ok(0);
        }

        for (offset, frame) in buf.chunks_exact_mut(2).take(frames).enumerate() {
            let s = self.sample_at(self.produced + offset as u64);
            frame.fill(s);
        }
        self.produced += frames as u64;

        if self.paced {
            self.pace(frames);
        }
        Ok(frames)
    }
}

/// Plays back a fixed interleaved stereo buffer.
#[derive(Debug, Clone)]
pub struct BufferSource {
    samples: Vec<f32>,
    position: usize,
    max_block_frames: Option<usize>,
    endpoint: Option<String>,
}

impl BufferSource {
    /// Source over interleaved L/R samples. A trailing unpaired sample is
    /// never delivered.
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            position: 0,
            max_block_frames: None,
            endpoint: None,
        }
    }

    /// Cap every read at `frames` stereo frames.
    #[must_use]
    pub fn with_block_frames(mut self, frames: usize) -> Self {
        self.max_block_frames = Some(frames.max(1));
        self
    }

    /// Report an audio endpoint for exclusive claiming.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Stereo frames not yet read.
    pub fn remaining_frames(&self) -> usize {
        self.samples.len().saturating_sub(self.position) / 2
    }
}

impl AudioSource for BufferSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Decoded
    }

    fn endpoint_id(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn open(&mut self) -> Result<(), SourceError> {
        self.position = 0;
        Ok(())
    }

    fn read(&mut self, buf: &mut [f32]) -> Result<usize, SourceError> {
        let mut frames = (buf.len() / 2).min(self.remaining_frames());
        if let Some(cap) = self.max_block_frames {
            frames = frames.min(cap);
        }
        let len = frames * 2;
        let (Some(src), Some(dst)) = (
            self.samples.get(self.position..self.position + len),
            buf.get_mut(..len),
        ) else {
            return Ok(0);
        };
        dst.copy_from_slice(src);
        self.position += len;
        Ok(frames)
    }
}
