//! Virtual controller for tests and demos.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use dualhaptics_errors::DeviceError;
use dualhaptics_hid_sony_protocol::ConnectionMode;
use parking_lot::Mutex;

use crate::ports::{DeviceConnection, DeviceId};

/// In-memory [`DeviceConnection`] that records every payload it receives.
///
/// Connection state and write failures can be toggled from any thread.
#[derive(Debug)]
pub struct VirtualDevice {
    id: DeviceId,
    mode: ConnectionMode,
    connected: AtomicBool,
    fail_writes: AtomicBool,
    fail_after: AtomicUsize,
    recording: AtomicBool,
    accepted: AtomicUsize,
    bytes: AtomicUsize,
    writes: Mutex<Vec<Vec<u8>>>,
}

impl VirtualDevice {
    /// Create a connected virtual controller.
    pub fn new(id: impl Into<DeviceId>, mode: ConnectionMode) -> Self {
        Self {
            id: id.into(),
            mode,
            connected: AtomicBool::new(true),
            fail_writes: AtomicBool::new(false),
            fail_after: AtomicUsize::new(usize::MAX),
            recording: AtomicBool::new(true),
            accepted: AtomicUsize::new(0),
            bytes: AtomicUsize::new(0),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Create a virtual controller that starts disconnected.
    pub fn disconnected(id: impl Into<DeviceId>, mode: ConnectionMode) -> Self {
        let device = Self::new(id, mode);
        device.disconnect();
        device
    }

    /// Simulate unplugging the controller.
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::Release);
    }

    /// Simulate plugging the controller back in.
    pub fn reconnect(&self) {
        self.connected.store(true, Ordering::Release);
    }

    /// Make every subsequent write fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Release);
    }

    /// Accept `count` more writes, then fail every write after that.
    pub fn fail_after(&self, count: usize) {
        let accepted = self.accepted.load(Ordering::Acquire);
        self.fail_after
            .store(accepted.saturating_add(count), Ordering::Release);
    }

    /// Keep or drop payloads of future writes. Counts are kept either way.
    pub fn set_recording(&self, recording: bool) {
        self.recording.store(recording, Ordering::Release);
    }

    /// All recorded payloads in write order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.writes.lock().clone()
    }

    /// Number of accepted writes.
    pub fn write_count(&self) -> usize {
        self.accepted.load(Ordering::Acquire)
    }

    /// Total bytes accepted.
    pub fn bytes_written(&self) -> usize {
        self.bytes.load(Ordering::Acquire)
    }

    /// Forget recorded payloads. Counts are kept.
    pub fn clear_writes(&self) {
        self.writes.lock().clear();
    }
}

impl DeviceConnection for VirtualDevice {
    fn device_id(&self) -> &DeviceId {
        &self.id
    }

    fn connection_mode(&self) -> ConnectionMode {
        self.mode
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    fn write_haptics(&self, payload: &[u8]) -> Result<(), DeviceError> {
        if !self.is_connected() {
            return Err(DeviceError::disconnected(self.id.as_str()));
        }
        if self.fail_writes.load(Ordering::Acquire) {
            return Err(DeviceError::write_failed(self.id.as_str(), "simulated write failure"));
        }

        let mut writes = self.writes.lock();
        let accepted = self.accepted.load(Ordering::Acquire);
        if accepted >= self.fail_after.load(Ordering::Acquire) {
            return Err(DeviceError::write_failed(self.id.as_str(), "simulated write failure"));
        }
        self.accepted.store(accepted + 1, Ordering::Release);
        self.bytes.fetch_add(payload.len(), Ordering::AcqRel);
        if self.recording.load(Ordering::Acquire) {
            writes.push(payload.to_vec());
        }
        Ok(())
    }
}
