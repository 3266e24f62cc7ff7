//! DualHaptics engine - audio-to-haptics sessions for Sony controllers
//!
//! Turns stereo audio at 48 kHz into the haptic payloads a DualSense or
//! DualShock 4 consumes, and delivers them on a fixed host tick.
//!
//! # Architecture
//!
//! ```text
//! AudioSource --producer thread--> filter -> [accumulate -> resample] -> encode
//!                                                                         |
//!                                                                  TransferQueue
//!                                                                         |
//! host loop --tick--> DeliveryScheduler --------------------------> DeviceConnection
//! ```
//!
//! - USB sessions encode every 48 kHz frame as a signed 16-bit pair.
//! - Bluetooth sessions collect 1024-frame windows, resample them to 64
//!   frames at 3 kHz and emit two 64-byte signed 8-bit packets per window.
//!
//! [`HapticsManager`] owns one [`HapticsSession`] per controller and reacts to
//! [`DeviceEvent`]s. Hardware discovery lives in [`platform`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use dualhaptics_engine::prelude::*;
//!
//! let device = Arc::new(VirtualDevice::new("pad-0", ConnectionMode::Usb));
//! let mut manager = HapticsManager::new(HapticsConfig::default());
//! manager.start(device.clone(), Box::new(ToneSource::new(220.0).with_frames(4800)))?;
//!
//! for _ in 0..4 {
//!     manager.tick();
//! }
//! # manager.stop(&DeviceId::from("pad-0"));
//! # Ok::<(), HapticsError>(())
//! ```

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod delivery;
pub mod device;
pub mod manager;
pub mod pacer;
pub mod platform;
pub mod ports;
pub mod prelude;
pub mod producer;
pub mod registry;
pub mod session;
pub mod source;

pub use config::{FilterConfig, HapticsConfig};
pub use delivery::{DeliveryScheduler, TickReport};
pub use device::VirtualDevice;
pub use manager::HapticsManager;
pub use pacer::{PacerStats, TickPacer};
pub use platform::{
    DeviceContext, HardwarePolicy, HidrawPolicy, PollResult, UnsupportedPlatformPolicy,
    select_platform_policy, should_treat_as_disconnected,
};
pub use ports::{AudioSource, DeviceConnection, DeviceEvent, DeviceId, SourceKind};
pub use producer::{HapticsProducer, SessionOutput};
pub use registry::{AudioEndpointRegistry, EndpointClaim};
pub use session::{HapticsSession, SessionState, StopReason, StopSummary};
pub use source::{BufferSource, ToneSource};

pub use dualhaptics_atomic::{CounterSnapshot, SessionCounters, TransferQueue};
pub use dualhaptics_errors::{DeviceError, HapticsError, Result, SourceError, ValidationError};
