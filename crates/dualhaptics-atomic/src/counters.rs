//! Atomic counters for one haptics session.
//!
//! The producer thread and the delivery tick both record into the same
//! [`SessionCounters`]; readers take a [`CounterSnapshot`].
//!
//! # RT Safety
//!
//! - `Ordering::Relaxed` everywhere; counters are independent
//! - Single atomic instruction per update, no allocation

use core::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counter snapshot returned by [`SessionCounters::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CounterSnapshot {
    /// Audio blocks read from the source
    pub blocks_received: u64,
    /// Stereo frames read from the source
    pub frames_received: u64,
    /// Resample windows processed (Bluetooth only)
    pub resample_cycles: u64,
    /// Bluetooth packets enqueued
    pub packets_produced: u64,
    /// USB sample pairs enqueued
    pub samples_produced: u64,
    /// Items handed to the device write path successfully
    pub items_delivered: u64,
    /// Failed device writes
    pub write_errors: u64,
    /// Non-finite input samples replaced with silence
    pub non_finite_samples: u64,
    /// Items dropped from the queue when the session stopped
    pub items_discarded: u64,
}

/// Atomic counters for RT-safe session observability.
///
/// # Example
///
/// ```rust
/// use dualhaptics_atomic::SessionCounters;
///
/// let counters = SessionCounters::new();
/// counters.record_block(1024);
/// counters.inc_resample_cycle();
/// counters.add_packets_produced(2);
///
/// let snapshot = counters.snapshot();
/// assert_eq!(snapshot.frames_received, 1024);
/// assert_eq!(snapshot.packets_produced, 2);
/// ```
#[derive(Debug)]
pub struct SessionCounters {
    blocks_received: AtomicU64,
    frames_received: AtomicU64,
    resample_cycles: AtomicU64,
    packets_produced: AtomicU64,
    samples_produced: AtomicU64,
    items_delivered: AtomicU64,
    write_errors: AtomicU64,
    non_finite_samples: AtomicU64,
    items_discarded: AtomicU64,
}

impl Default for SessionCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionCounters {
    /// Create counters initialized to zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            blocks_received: AtomicU64::new(0),
            frames_received: AtomicU64::new(0),
            resample_cycles: AtomicU64::new(0),
            packets_produced: AtomicU64::new(0),
            samples_produced: AtomicU64::new(0),
            items_delivered: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            non_finite_samples: AtomicU64::new(0),
            items_discarded: AtomicU64::new(0),
        }
    }

    /// Record one source block of `frames` stereo frames.
    #[inline]
    pub fn record_block(&self, frames: u64) {
        self.blocks_received.fetch_add(1, Ordering::Relaxed);
        self.frames_received.fetch_add(frames, Ordering::Relaxed);
    }

    /// Record one resample window.
    #[inline]
    pub fn inc_resample_cycle(&self) {
        self.resample_cycles.fetch_add(1, Ordering::Relaxed);
    }

    /// Record enqueued Bluetooth packets.
    #[inline]
    pub fn add_packets_produced(&self, n: u64) {
        self.packets_produced.fetch_add(n, Ordering::Relaxed);
    }

    /// Record enqueued USB sample pairs.
    #[inline]
    pub fn add_samples_produced(&self, n: u64) {
        self.samples_produced.fetch_add(n, Ordering::Relaxed);
    }

    /// Record items written to the device.
    #[inline]
    pub fn add_delivered(&self, n: u64) {
        self.items_delivered.fetch_add(n, Ordering::Relaxed);
    }

    /// Record one failed device write.
    #[inline]
    pub fn inc_write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record non-finite samples replaced with silence.
    #[inline]
    pub fn add_non_finite(&self, n: u64) {
        self.non_finite_samples.fetch_add(n, Ordering::Relaxed);
    }

    /// Record items discarded at stop.
    #[inline]
    pub fn add_discarded(&self, n: u64) {
        self.items_discarded.fetch_add(n, Ordering::Relaxed);
    }

    /// Number of failed device writes so far.
    #[inline]
    pub fn write_errors(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    /// Read all counters.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            blocks_received: self.blocks_received.load(Ordering::Relaxed),
            frames_received: self.frames_received.load(Ordering::Relaxed),
            resample_cycles: self.resample_cycles.load(Ordering::Relaxed),
            packets_produced: self.packets_produced.load(Ordering::Relaxed),
            samples_produced: self.samples_produced.load(Ordering::Relaxed),
            items_delivered: self.items_delivered.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
            non_finite_samples: self.non_finite_samples.load(Ordering::Relaxed),
            items_discarded: self.items_discarded.load(Ordering::Relaxed),
        }
    }
}
