//! Absolute-deadline pacing for the host delivery loop.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Timing statistics for a [`TickPacer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PacerStats {
    /// Ticks completed
    pub ticks: u64,
    /// Ticks entered more than half a period late
    pub missed_deadlines: u64,
    /// Worst lateness observed, in microseconds
    pub max_lateness_us: u64,
}

/// Sleeps until fixed, absolute tick deadlines.
///
/// Deadlines advance by exactly one period per tick so sleep overshoot does
/// not accumulate. When the caller falls more than one period behind, the
/// schedule restarts from now instead of bursting to catch up.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use dualhaptics_engine::TickPacer;
///
/// let mut pacer = TickPacer::new(Duration::from_millis(16));
/// for _ in 0..10 {
///     pacer.wait_for_tick();
///     // deliver
/// }
/// ```
#[derive(Debug)]
pub struct TickPacer {
    period: Duration,
    next_tick: Instant,
    stats: PacerStats,
}

impl TickPacer {
    /// Pacer whose first tick is due immediately.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_micros(1)),
            next_tick: Instant::now(),
            stats: PacerStats::default(),
        }
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next deadline. Returns the tick number.
    pub fn wait_for_tick(&mut self) -> u64 {
        let now = Instant::now();
        if now < self.next_tick {
            std::thread::sleep(self.next_tick - now);
        } else {
            let lateness = now.duration_since(self.next_tick);
            if lateness > self.period / 2 {
                self.stats.missed_deadlines += 1;
                let lateness_us = u64::try_from(lateness.as_micros()).unwrap_or(u64::MAX);
                self.stats.max_lateness_us = self.stats.max_lateness_us.max(lateness_us);
            }
            if lateness > self.period {
                self.next_tick = now;
            }
        }

        self.next_tick += self.period;
        self.stats.ticks += 1;
        self.stats.ticks
    }

    /// Statistics so far.
    pub fn stats(&self) -> PacerStats {
        self.stats
    }
}
