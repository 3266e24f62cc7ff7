//! Port traits for the collaborators around the haptics pipeline.
//!
//! The engine decides what bytes to send; how they reach the controller and
//! where the audio comes from live behind these traits.
//!
//! # RT Safety
//!
//! [`AudioSource::read`] runs on the producer thread and
//! [`DeviceConnection::write_haptics`] runs on the delivery tick. Neither
//! should block longer than one audio block or one tick respectively.

use std::fmt;
use std::sync::Arc;

use dualhaptics_errors::{DeviceError, SourceError};
use dualhaptics_hid_sony_protocol::ConnectionMode;
use serde::{Deserialize, Serialize};

/// Stable identifier of a connected controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Create a device identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DeviceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Write path to one controller.
///
/// Shared between the session's producer thread, which only polls
/// [`is_connected`](Self::is_connected), and the delivery tick, which writes.
pub trait DeviceConnection: Send + Sync {
    /// Identity of the controller.
    fn device_id(&self) -> &DeviceId;

    /// Transport the controller is attached with. Fixed for the connection.
    fn connection_mode(&self) -> ConnectionMode;

    /// Whether the controller is still reachable.
    fn is_connected(&self) -> bool;

    /// Send one haptics payload.
    ///
    /// Bluetooth payloads are single 64-byte packets. USB payloads are
    /// concatenated little-endian i16 L/R pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`DeviceError`] when the transport rejects the write.
    fn write_haptics(&self, payload: &[u8]) -> Result<(), DeviceError>;
}

impl fmt::Debug for dyn DeviceConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConnection")
            .field("id", self.device_id())
            .field("mode", &self.connection_mode())
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// What feeds an audio source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// System audio loopback capture
    Loopback,
    /// Decoded media file
    Decoded,
    /// Generated in process
    Synthetic,
}

/// Producer of 48 kHz interleaved stereo float audio.
pub trait AudioSource: Send {
    /// Kind of source.
    fn kind(&self) -> SourceKind;

    /// Audio endpoint this source binds to, if any.
    ///
    /// Sessions claim the endpoint exclusively for their lifetime.
    fn endpoint_id(&self) -> Option<&str> {
        None
    }

    /// Prepare the source for reading.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the source cannot be bound.
    fn open(&mut self) -> Result<(), SourceError>;

    /// Fill `buf` with interleaved L/R samples.
    ///
    /// Returns the number of stereo frames written. `Ok(0)` signals end of
    /// stream. Sources pace themselves like an audio callback would.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] on a decode or capture failure.
    fn read(&mut self, buf: &mut [f32]) -> Result<usize, SourceError>;
}

/// Device lifecycle notifications from the host's device registry.
#[derive(Clone)]
pub enum DeviceEvent {
    /// A controller became available
    Connected(Arc<dyn DeviceConnection>),
    /// A controller went away
    Disconnected(DeviceId),
}

impl fmt::Debug for DeviceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceEvent::Connected(device) => f.debug_tuple("Connected").field(device.device_id()).finish(),
            DeviceEvent::Disconnected(id) => f.debug_tuple("Disconnected").field(id).finish(),
        }
    }
}
