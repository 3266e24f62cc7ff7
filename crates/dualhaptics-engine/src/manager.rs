//! Multi-controller session management.
//!
//! The manager owns one [`HapticsSession`] per connected controller, reacts
//! to hot-plug events and drives the shared delivery tick. It is meant to be
//! owned by the host's main loop thread.

use std::collections::BTreeMap;
use std::sync::Arc;

use crossbeam::channel::{Receiver, TryRecvError};
use dualhaptics_errors::{DeviceError, HapticsError};
use tracing::{debug, info, warn};

use crate::config::HapticsConfig;
use crate::delivery::{DeliveryScheduler, TickReport};
use crate::ports::{AudioSource, DeviceConnection, DeviceEvent, DeviceId};
use crate::registry::AudioEndpointRegistry;
use crate::session::{HapticsSession, SessionState, StopSummary};

/// Owns every controller's session and the delivery scheduler.
#[derive(Debug)]
pub struct HapticsManager {
    config: HapticsConfig,
    registry: AudioEndpointRegistry,
    sessions: BTreeMap<DeviceId, HapticsSession>,
    scheduler: DeliveryScheduler,
    events: Option<Receiver<DeviceEvent>>,
}

impl HapticsManager {
    /// Manager with its own endpoint registry.
    pub fn new(config: HapticsConfig) -> Self {
        Self::with_registry(config, AudioEndpointRegistry::new())
    }

    /// Manager sharing an existing endpoint registry.
    pub fn with_registry(config: HapticsConfig, registry: AudioEndpointRegistry) -> Self {
        Self {
            config,
            registry,
            sessions: BTreeMap::new(),
            scheduler: DeliveryScheduler::new(),
            events: None,
        }
    }

    /// Consume hot-plug events from `events` at the start of every tick.
    #[must_use]
    pub fn with_events(mut self, events: Receiver<DeviceEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Register an idle session for a controller.
    ///
    /// An existing session is kept if it belongs to the same connection and
    /// transport. A different connection object or a changed transport
    /// stops the old session and replaces it; its summary is returned.
    pub fn connect(&mut self, device: Arc<dyn DeviceConnection>) -> Option<StopSummary> {
        let id = device.device_id().clone();
        let mode = device.connection_mode();

        let mut replaced = None;
        if let Some(existing) = self.sessions.get(&id) {
            if Arc::ptr_eq(existing.device(), &device) && existing.mode() == mode {
                debug!(device = %id, "Device already registered");
                return None;
            }
            info!(device = %id, old_mode = %existing.mode(), new_mode = %mode, "Replacing haptics session");
            replaced = self.stop(&id);
        }

        self.sessions
            .insert(id.clone(), HapticsSession::new(device, self.config.clone()));
        info!(device = %id, %mode, "Device registered");
        replaced
    }

    /// Register the controller if needed and start streaming `source` to it.
    ///
    /// # Errors
    ///
    /// See [`HapticsSession::start`]. On error the session stays registered
    /// and `Idle`.
    pub fn start(
        &mut self,
        device: Arc<dyn DeviceConnection>,
        source: Box<dyn AudioSource>,
    ) -> Result<(), HapticsError> {
        let id = device.device_id().clone();
        self.connect(device);
        self.start_registered(&id, source)
    }

    /// Start streaming to an already registered controller.
    ///
    /// A session that has already stopped is recreated first.
    ///
    /// # Errors
    ///
    /// [`DeviceError::NotConnected`] if the id is unknown, otherwise see
    /// [`HapticsSession::start`].
    pub fn start_registered(
        &mut self,
        id: &DeviceId,
        source: Box<dyn AudioSource>,
    ) -> Result<(), HapticsError> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| DeviceError::not_connected(id.as_str()))?;

        if session.state() == SessionState::Stopped || session.has_ended() {
            let device = Arc::clone(session.device());
            session.stop();
            *session = HapticsSession::new(device, self.config.clone());
        }

        session.start(source, &self.registry)
    }

    /// Stop and forget a controller's session.
    pub fn stop(&mut self, id: &DeviceId) -> Option<StopSummary> {
        let mut session = self.sessions.remove(id)?;
        Some(session.stop())
    }

    /// Stop every session.
    pub fn stop_all(&mut self) -> Vec<(DeviceId, StopSummary)> {
        let sessions = std::mem::take(&mut self.sessions);
        sessions
            .into_iter()
            .map(|(id, mut session)| {
                let summary = session.stop();
                (id, summary)
            })
            .collect()
    }

    /// Apply one hot-plug event.
    pub fn handle_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::Connected(device) => {
                self.connect(device);
            }
            DeviceEvent::Disconnected(id) => {
                if let Some(summary) = self.stop(&id) {
                    info!(device = %id, discarded = summary.discarded, "Device removed");
                }
            }
        }
    }

    /// Drain pending hot-plug events. Returns how many were applied.
    pub fn pump_events(&mut self) -> usize {
        let Some(events) = self.events.clone() else {
            return 0;
        };

        let mut applied = 0;
        loop {
            match events.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Device event channel closed");
                    self.events = None;
                    break;
                }
            }
        }
        applied
    }

    /// One host tick: apply events, deliver queued haptics, reap finished
    /// sessions.
    pub fn tick(&mut self) -> TickReport {
        let report = self.deliver();
        self.reap();
        report
    }

    /// Apply events and deliver queued haptics without reaping, for hosts
    /// that stop finished sessions themselves.
    pub fn deliver(&mut self) -> TickReport {
        self.pump_events();
        self.scheduler.tick(self.sessions.values())
    }

    /// Stop sessions whose producer ended on its own and remove them.
    pub fn reap(&mut self) -> Vec<(DeviceId, StopSummary)> {
        let ended: Vec<DeviceId> = self
            .sessions
            .iter()
            .filter(|(_, session)| session.has_ended())
            .map(|(id, _)| id.clone())
            .collect();

        ended
            .into_iter()
            .filter_map(|id| {
                let summary = self.stop(&id)?;
                info!(device = %id, reason = ?summary.reason, "Reaped finished session");
                Some((id, summary))
            })
            .collect()
    }

    /// Session for a controller.
    pub fn session(&self, id: &DeviceId) -> Option<&HapticsSession> {
        self.sessions.get(id)
    }

    /// All sessions, ordered by device id.
    pub fn sessions(&self) -> impl Iterator<Item = &HapticsSession> {
        self.sessions.values()
    }

    /// Number of registered controllers.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no controller is registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Shared endpoint registry.
    pub fn registry(&self) -> &AudioEndpointRegistry {
        &self.registry
    }

    /// Configuration applied to new sessions.
    pub fn config(&self) -> &HapticsConfig {
        &self.config
    }
}

impl Drop for HapticsManager {
    fn drop(&mut self) {
        if !self.sessions.is_empty() {
            debug!(sessions = self.sessions.len(), "Stopping sessions on manager drop");
            self.stop_all();
        }
    }
}
