//! Common imports for hosts embedding the engine.
//!
//! ```
//! use dualhaptics_engine::prelude::*;
//! ```

pub use crate::config::{FilterConfig, HapticsConfig};
pub use crate::delivery::{DeliveryScheduler, TickReport};
pub use crate::device::VirtualDevice;
pub use crate::manager::HapticsManager;
pub use crate::pacer::TickPacer;
pub use crate::ports::{AudioSource, DeviceConnection, DeviceEvent, DeviceId, SourceKind};
pub use crate::registry::AudioEndpointRegistry;
pub use crate::session::{HapticsSession, SessionState, StopReason, StopSummary};
pub use crate::source::{BufferSource, ToneSource};

pub use dualhaptics_errors::{DeviceError, HapticsError, SourceError, ValidationError};
pub use dualhaptics_hid_sony_protocol::{ConnectionMode, DeviceModel, HapticPacket, HapticSample};
