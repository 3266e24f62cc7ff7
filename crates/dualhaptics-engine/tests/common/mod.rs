//! Scripted audio sources shared by the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::collections::VecDeque;
use std::time::Duration;

use crossbeam::channel::{Receiver, Sender, bounded};
use dualhaptics_engine::{AudioSource, SourceError, SourceKind};

/// One scripted read result.
#[derive(Debug, Clone)]
pub enum Step {
    /// Deliver these interleaved samples
    Block(Vec<f32>),
    /// Fail the read
    Fail(String),
}

/// Replays a fixed script, then either ends the stream or holds it open
/// until the gate is released.
#[derive(Debug)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    endpoint: Option<String>,
    fail_open: bool,
    gate: Option<Receiver<()>>,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            endpoint: None,
            fail_open: false,
            gate: None,
        }
    }

    /// Source that yields each block in turn and then ends.
    pub fn blocks(blocks: impl IntoIterator<Item = Vec<f32>>) -> Self {
        Self::new(blocks.into_iter().map(Step::Block))
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_owned());
        self
    }

    pub fn failing_open() -> Self {
        let mut source = Self::new([]);
        source.fail_open = true;
        source
    }

    /// Hold the stream open after the script until the returned sender is
    /// dropped or signalled.
    pub fn gated(mut self) -> (Self, Sender<()>) {
        let (tx, rx) = bounded(1);
        self.gate = Some(rx);
        (self, tx)
    }
}

impl AudioSource for ScriptedSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Decoded
    }

    fn endpoint_id(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn open(&mut self) -> Result<(), SourceError> {
        if self.fail_open {
            return Err(SourceError::unavailable("scripted open failure"));
        }
        Ok(())
    }

    fn read(&mut self, buf: &mut [f32]) -> Result<usize, SourceError> {
        match self.steps.pop_front() {
            Some(Step::Block(samples)) => {
                let len = samples.len().min(buf.len()) & !1;
                buf[..len].copy_from_slice(&samples[..len]);
                Ok(len / 2)
            }
            Some(Step::Fail(message)) => Err(SourceError::read_failed(message)),
            None => {
                if let Some(gate) = &self.gate {
                    gate.recv_timeout(Duration::from_secs(10)).ok();
                }
                Ok(0)
            }
        }
    }
}

/// Source that hands out silence forever, a small block at a time.
#[derive(Debug, Default)]
pub struct EndlessSilence;

impl AudioSource for EndlessSilence {
    fn kind(&self) -> SourceKind {
        SourceKind::Loopback
    }

    fn open(&mut self) -> Result<(), SourceError> {
        Ok(())
    }

    fn read(&mut self, buf: &mut [f32]) -> Result<usize, SourceError> {
        std::thread::sleep(Duration::from_millis(1));
        let frames = (buf.len() / 2).min(256);
        buf[..frames * 2].fill(0.0);
        Ok(frames)
    }
}
