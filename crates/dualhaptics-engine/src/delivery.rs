//! Delivery tick: drain session queues into the device write path.
//!
//! Called by the host's main loop at a fixed cadence (16 ms by default).
//! Only sessions in `Starting` or `Streaming` with a connected controller
//! are serviced.
//!
//! - Bluetooth: one write per 64-byte packet, FIFO
//! - USB: every pair drained this tick in one little-endian write
//!
//! There are no retries. A failed write drops that item, ends delivery for
//! that session for this tick and leaves the rest queued.

use std::ops::AddAssign;

use dualhaptics_hid_sony_protocol::USB_SAMPLE_BYTES;
use serde::Serialize;
use tracing::debug;

use crate::producer::SessionOutput;
use crate::session::HapticsSession;

/// What one tick wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Sessions that were eligible for delivery
    pub sessions_serviced: usize,
    /// Bluetooth packets written
    pub packets_written: usize,
    /// USB sample pairs written
    pub samples_written: usize,
    /// Failed writes
    pub write_errors: usize,
}

impl TickReport {
    /// Whether anything was written or attempted.
    pub fn is_idle(&self) -> bool {
        self.packets_written == 0 && self.samples_written == 0 && self.write_errors == 0
    }
}

impl AddAssign for TickReport {
    fn add_assign(&mut self, rhs: Self) {
        self.sessions_serviced += rhs.sessions_serviced;
        self.packets_written += rhs.packets_written;
        self.samples_written += rhs.samples_written;
        self.write_errors += rhs.write_errors;
    }
}

/// Consumer side of all sessions.
///
/// Owns a scratch buffer for USB batching so steady-state ticks do not
/// allocate.
#[derive(Debug, Default)]
pub struct DeliveryScheduler {
    usb_scratch: Vec<u8>,
}

impl DeliveryScheduler {
    /// Create a scheduler with an empty scratch buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler able to batch `pairs` USB sample pairs without
    /// allocating.
    pub fn with_usb_capacity(pairs: usize) -> Self {
        Self {
            usb_scratch: Vec::with_capacity(pairs.saturating_mul(USB_SAMPLE_BYTES)),
        }
    }

    /// Drain every eligible session once.
    pub fn tick<'a, I>(&mut self, sessions: I) -> TickReport
    where
        I: IntoIterator<Item = &'a HapticsSession>,
    {
        let mut report = TickReport::default();
        for session in sessions {
            report += self.deliver(session);
        }
        report
    }

    /// Drain one session's queue into its controller.
    pub fn deliver(&mut self, session: &HapticsSession) -> TickReport {
        let device = session.device();
        if !session.is_active() || !device.is_connected() {
            return TickReport::default();
        }

        let counters = session.counters_handle();
        let mut report = TickReport {
            sessions_serviced: 1,
            ..TickReport::default()
        };

        match session.output() {
            SessionOutput::Bluetooth(queue) => {
                while let Some(packet) = queue.try_pop() {
                    match device.write_haptics(packet.as_bytes()) {
                        Ok(()) => report.packets_written += 1,
                        Err(e) => {
                            debug!(device = %device.device_id(), error = %e, "Haptics packet write failed");
                            counters.inc_write_error();
                            report.write_errors += 1;
                            break;
                        }
                    }
                }
                counters.add_delivered(report.packets_written as u64);
            }
            SessionOutput::Usb(queue) => {
                self.usb_scratch.clear();
                let mut pairs = 0usize;
                while let Some(sample) = queue.try_pop() {
                    self.usb_scratch.extend_from_slice(&sample.to_le_bytes());
                    pairs += 1;
                }
                if pairs > 0 {
                    match device.write_haptics(&self.usb_scratch) {
                        Ok(()) => {
                            report.samples_written = pairs;
                            counters.add_delivered(pairs as u64);
                        }
                        Err(e) => {
                            debug!(device = %device.device_id(), error = %e, pairs, "Haptics sample write failed");
                            counters.inc_write_error();
                            report.write_errors += 1;
                        }
                    }
                }
            }
        }

        report
    }
}
