//! Haptics session lifecycle.
//!
//! A session binds one controller to one audio source and owns the producer
//! thread that feeds the session's transfer queue.
//!
//! ```text
//! Idle --start--> Starting --first block--> Streaming
//!                    |                          |
//!                    +------ EOS / disconnect / source error / stop
//!                                       |
//!                                   Stopping --join, discard queue--> Stopped
//! ```
//!
//! Start failures (device not connected, source cannot open, endpoint busy)
//! are returned synchronously and leave the session in `Idle` with no
//! thread. Mid-stream failures move the session to `Stopping` and are only
//! logged. Stopping is immediate: queued items are discarded, not flushed.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::thread::{self, JoinHandle};

use dualhaptics_atomic::{CounterSnapshot, SessionCounters};
use dualhaptics_errors::{DeviceError, HapticsError, SourceError};
use dualhaptics_hid_sony_protocol::ConnectionMode;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::HapticsConfig;
use crate::ports::{AudioSource, DeviceConnection, DeviceId};
use crate::producer::{HapticsProducer, SessionOutput};
use crate::registry::{AudioEndpointRegistry, EndpointClaim};

/// Lifecycle state of a [`HapticsSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum SessionState {
    /// Created, no producer thread
    Idle = 0,
    /// Producer thread running, no audio yet
    Starting = 1,
    /// Audio flowing
    Streaming = 2,
    /// Producer finished or asked to finish
    Stopping = 3,
    /// Producer joined, queue discarded (terminal)
    Stopped = 4,
}

impl SessionState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => SessionState::Idle,
            1 => SessionState::Starting,
            2 => SessionState::Streaming,
            3 => SessionState::Stopping,
            _ => SessionState::Stopped,
        }
    }

    /// Whether the delivery tick should service the session.
    pub fn is_active(self) -> bool {
        matches!(self, SessionState::Starting | SessionState::Streaming)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "Idle",
            SessionState::Starting => "Starting",
            SessionState::Streaming => "Streaming",
            SessionState::Stopping => "Stopping",
            SessionState::Stopped => "Stopped",
        };
        f.write_str(name)
    }
}

/// Why a session left the streaming states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum StopReason {
    /// Explicit stop from the host
    Requested,
    /// The source reported end of stream
    EndOfStream,
    /// The controller went away
    DeviceDisconnected,
    /// The source failed mid-stream
    SourceFailed(String),
    /// The producer thread panicked
    ProducerPanicked,
}

/// Outcome of [`HapticsSession::stop`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopSummary {
    /// Why streaming ended
    pub reason: StopReason,
    /// Queued items dropped at stop
    pub discarded: usize,
}

#[derive(Debug)]
struct SessionShared {
    state: AtomicU8,
    stop_requested: AtomicBool,
    producer_done: AtomicBool,
    end_reason: Mutex<Option<StopReason>>,
}

impl SessionShared {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(SessionState::Idle as u8),
            stop_requested: AtomicBool::new(false),
            producer_done: AtomicBool::new(false),
            end_reason: Mutex::new(None),
        }
    }

    fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: SessionState) {
        self.state.store(state as u8, Ordering::Release);
    }

    fn transition(&self, from: SessionState, to: SessionState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Record why the producer finished, keeping the first reason.
    fn finish(&self, reason: StopReason) {
        {
            let mut end_reason = self.end_reason.lock();
            if end_reason.is_none() {
                *end_reason = Some(reason);
            }
        }
        if !self.transition(SessionState::Starting, SessionState::Stopping) {
            self.transition(SessionState::Streaming, SessionState::Stopping);
        }
        self.producer_done.store(true, Ordering::Release);
    }
}

/// One controller's end-to-end haptics pipeline.
pub struct HapticsSession {
    device: Arc<dyn DeviceConnection>,
    mode: ConnectionMode,
    config: HapticsConfig,
    output: SessionOutput,
    counters: Arc<SessionCounters>,
    shared: Arc<SessionShared>,
    producer: Option<JoinHandle<()>>,
    claim: Option<EndpointClaim>,
}

impl fmt::Debug for HapticsSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HapticsSession")
            .field("device", self.device.device_id())
            .field("mode", &self.mode)
            .field("state", &self.state())
            .field("queued", &self.output.len())
            .finish()
    }
}

impl HapticsSession {
    /// Create an idle session for a controller.
    ///
    /// The connection mode is read once here and fixed for the session.
    pub fn new(device: Arc<dyn DeviceConnection>, config: HapticsConfig) -> Self {
        let mode = device.connection_mode();
        Self {
            output: SessionOutput::for_mode(mode),
            device,
            mode,
            config,
            counters: Arc::new(SessionCounters::new()),
            shared: Arc::new(SessionShared::new()),
            producer: None,
            claim: None,
        }
    }

    /// Bind an audio source and spawn the producer thread.
    ///
    /// # Errors
    ///
    /// - [`HapticsError::InvalidState`] unless the session is `Idle`
    /// - [`ValidationError`](dualhaptics_errors::ValidationError) if the session configuration is out of range
    /// - [`DeviceError::NotConnected`] if the controller is not reachable
    /// - [`SourceError`] if the endpoint is busy or the source fails to open
    /// - [`HapticsError::SpawnFailed`] if the thread cannot be created
    ///
    /// On error the session stays `Idle` and no thread exists.
    pub fn start(
        &mut self,
        mut source: Box<dyn AudioSource>,
        registry: &AudioEndpointRegistry,
    ) -> Result<(), HapticsError> {
        let state = self.state();
        if state != SessionState::Idle {
            return Err(HapticsError::invalid_state(
                SessionState::Idle.to_string(),
                state.to_string(),
            ));
        }

        self.config.validate()?;

        let id = self.device.device_id().clone();
        if !self.device.is_connected() {
            return Err(DeviceError::not_connected(id.as_str()).into());
        }

        let claim = source
            .endpoint_id()
            .map(|endpoint| registry.claim(endpoint))
            .transpose()?;
        source.open()?;

        self.output.clear();
        let producer =
            HapticsProducer::new(self.output.clone(), &self.config, Arc::clone(&self.counters));

        self.shared.stop_requested.store(false, Ordering::Release);
        self.shared.producer_done.store(false, Ordering::Release);
        *self.shared.end_reason.lock() = None;
        self.shared.set_state(SessionState::Starting);

        let context = ProducerContext {
            device: Arc::clone(&self.device),
            shared: Arc::clone(&self.shared),
            source,
            producer,
            read_block_frames: self.config.read_block_frames,
        };

        let handle = thread::Builder::new()
            .name(format!("haptics-{id}"))
            .spawn(move || run_producer(context))
            .map_err(|e| {
                self.shared.set_state(SessionState::Idle);
                HapticsError::SpawnFailed(e)
            })?;

        self.producer = Some(handle);
        self.claim = claim;
        info!(device = %id, mode = %self.mode, "Haptics session started");
        Ok(())
    }

    /// Stop the session: signal and join the producer, then discard the queue.
    ///
    /// Stopping an `Idle` session moves it straight to `Stopped`. Stopping an
    /// already stopped session is a no-op that reports nothing discarded.
    pub fn stop(&mut self) -> StopSummary {
        let state = self.state();
        if state == SessionState::Stopped {
            return StopSummary {
                reason: self
                    .shared
                    .end_reason
                    .lock()
                    .clone()
                    .unwrap_or(StopReason::Requested),
                discarded: 0,
            };
        }

        let id = self.device.device_id().clone();
        if state != SessionState::Idle {
            self.shared.set_state(SessionState::Stopping);
        }
        self.shared.stop_requested.store(true, Ordering::Release);

        if let Some(handle) = self.producer.take() {
            match handle.join() {
                Ok(()) => debug!(device = %id, "Producer thread joined"),
                Err(_) => {
                    error!(device = %id, "Producer thread panicked");
                    self.shared.finish(StopReason::ProducerPanicked);
                }
            }
        }

        let discarded = self.output.clear();
        self.counters.add_discarded(discarded as u64);
        self.claim = None;

        let reason = {
            let mut end_reason = self.shared.end_reason.lock();
            end_reason.get_or_insert(StopReason::Requested).clone()
        };
        self.shared.set_state(SessionState::Stopped);

        info!(device = %id, ?reason, discarded, "Haptics session stopped");
        StopSummary { reason, discarded }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.shared.state()
    }

    /// Whether the delivery tick should service this session.
    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    /// Whether the producer finished on its own (end of stream, disconnect,
    /// source failure) and the session is waiting to be stopped.
    pub fn has_ended(&self) -> bool {
        self.producer.is_some() && self.shared.producer_done.load(Ordering::Acquire)
    }

    /// Transport fixed at creation.
    pub fn mode(&self) -> ConnectionMode {
        self.mode
    }

    /// Controller identity.
    pub fn device_id(&self) -> &DeviceId {
        self.device.device_id()
    }

    /// Controller write path.
    pub fn device(&self) -> &Arc<dyn DeviceConnection> {
        &self.device
    }

    /// Configuration the session was created with.
    pub fn config(&self) -> &HapticsConfig {
        &self.config
    }

    /// Items waiting for delivery.
    pub fn queued_items(&self) -> usize {
        self.output.len()
    }

    /// Counter snapshot.
    pub fn counters(&self) -> CounterSnapshot {
        self.counters.snapshot()
    }

    pub(crate) fn output(&self) -> &SessionOutput {
        &self.output
    }

    pub(crate) fn counters_handle(&self) -> &SessionCounters {
        &self.counters
    }
}

impl Drop for HapticsSession {
    fn drop(&mut self) {
        if self.producer.is_some() {
            warn!(device = %self.device.device_id(), "Haptics session dropped while running - forcing stop");
            self.stop();
        }
    }
}

struct ProducerContext {
    device: Arc<dyn DeviceConnection>,
    shared: Arc<SessionShared>,
    source: Box<dyn AudioSource>,
    producer: HapticsProducer,
    read_block_frames: usize,
}

fn run_producer(mut ctx: ProducerContext) {
    let id = ctx.device.device_id().clone();
    let mut buffer = vec![0.0f32; ctx.read_block_frames.max(1) * 2];
    info!(device = %id, "Producer thread started");

    let reason = loop {
        if ctx.shared.stop_requested.load(Ordering::Acquire) {
            break StopReason::Requested;
        }
        if !ctx.device.is_connected() {
            warn!(device = %id, "Device disconnected while streaming");
            break StopReason::DeviceDisconnected;
        }

        let frames = match ctx.source.read(&mut buffer) {
            Ok(0) => {
                info!(device = %id, "Audio source reached end of stream");
                break StopReason::EndOfStream;
            }
            Ok(frames) => frames,
            Err(SourceError::ReadFailed(message)) | Err(SourceError::Unavailable(message)) => {
                warn!(device = %id, %message, "Audio source failed, ending stream");
                break StopReason::SourceFailed(message);
            }
            Err(e) => {
                warn!(device = %id, error = %e, "Audio source failed, ending stream");
                break StopReason::SourceFailed(e.to_string());
            }
        };

        if ctx.shared.transition(SessionState::Starting, SessionState::Streaming) {
            info!(device = %id, "First audio block received, streaming");
        }

        let samples = frames.min(buffer.len() / 2) * 2;
        if let Some(block) = buffer.get_mut(..samples)
            && let Err(e) = ctx.producer.process_block(block)
        {
            warn!(device = %id, error = %e, "Dropped malformed audio block");
        }
    };

    ctx.shared.finish(reason);
    debug!(device = %id, "Producer thread exiting");
}
