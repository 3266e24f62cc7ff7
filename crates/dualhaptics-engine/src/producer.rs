//! Producer side of a haptics session.
//!
//! Runs on the session's producer thread, once per audio block:
//!
//! ```text
//! USB:        block -> filter -> i16 pairs ----------------------------> queue
//! Bluetooth:  block -> filter -> accumulator -> resample -> filter -> 2 x 64-byte packets -> queue
//! ```
//!
//! Filter and accumulator state are owned here and never shared with the
//! delivery side; only the queue crosses threads.
//!
//! # RT Safety
//!
//! - No allocation once the accumulator reservation covers the block size
//! - No locks; queue pushes are lock-free
//! - No logging per sample

use std::sync::Arc;

use dualhaptics_atomic::{SessionCounters, TransferQueue};
use dualhaptics_dsp::{
    BlockAccumulator, CHANNELS, FilterState, RESAMPLE_INPUT_SAMPLES, RESAMPLE_OUTPUT_SAMPLES,
    SampleFilter, resample_block,
};
use dualhaptics_errors::ValidationError;
use dualhaptics_hid_sony_protocol::{
    BT_BLOCK_SAMPLES, ConnectionMode, HapticPacket, HapticSample, encode_bt_block,
    encode_usb_frame,
};

use crate::config::HapticsConfig;

const _: () = assert!(RESAMPLE_OUTPUT_SAMPLES == BT_BLOCK_SAMPLES);

/// Queue a session's producer writes into, typed by transport.
#[derive(Debug, Clone)]
pub enum SessionOutput {
    /// 64-byte packets, enqueued in pairs
    Bluetooth(Arc<TransferQueue<HapticPacket>>),
    /// One i16 stereo pair per source frame
    Usb(Arc<TransferQueue<HapticSample>>),
}

impl SessionOutput {
    /// Create an empty queue for a transport.
    pub fn for_mode(mode: ConnectionMode) -> Self {
        match mode {
            ConnectionMode::Bluetooth => SessionOutput::Bluetooth(Arc::new(TransferQueue::new())),
            ConnectionMode::Usb => SessionOutput::Usb(Arc::new(TransferQueue::new())),
        }
    }

    /// Transport this queue serves.
    pub fn mode(&self) -> ConnectionMode {
        match self {
            SessionOutput::Bluetooth(_) => ConnectionMode::Bluetooth,
            SessionOutput::Usb(_) => ConnectionMode::Usb,
        }
    }

    /// Queued items (packets or sample pairs).
    pub fn len(&self) -> usize {
        match self {
            SessionOutput::Bluetooth(q) => q.len(),
            SessionOutput::Usb(q) => q.len(),
        }
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        match self {
            SessionOutput::Bluetooth(q) => q.is_empty(),
            SessionOutput::Usb(q) => q.is_empty(),
        }
    }

    /// Drop every queued item and return how many were discarded.
    pub fn clear(&self) -> usize {
        match self {
            SessionOutput::Bluetooth(q) => q.clear(),
            SessionOutput::Usb(q) => q.clear(),
        }
    }
}

/// Filter, resample and encode chain for one session.
#[derive(Debug)]
pub struct HapticsProducer {
    output: SessionOutput,
    source_filter: SampleFilter,
    resampled_filter: SampleFilter,
    accumulator: BlockAccumulator,
    window: [f32; RESAMPLE_INPUT_SAMPLES],
    counters: Arc<SessionCounters>,
}

impl HapticsProducer {
    /// Build a producer writing into `output` with fresh filter state.
    pub fn new(output: SessionOutput, config: &HapticsConfig, counters: Arc<SessionCounters>) -> Self {
        let mode = output.mode();
        let accumulator = match mode {
            ConnectionMode::Bluetooth => {
                BlockAccumulator::with_capacity_blocks(config.accumulator_reserve_blocks)
            }
            ConnectionMode::Usb => BlockAccumulator::new(),
        };
        Self {
            output,
            source_filter: config.source_filter(mode),
            resampled_filter: config.resampled_filter(),
            accumulator,
            window: [0.0; RESAMPLE_INPUT_SAMPLES],
            counters,
        }
    }

    /// Transport this producer encodes for.
    pub fn mode(&self) -> ConnectionMode {
        self.output.mode()
    }

    /// Samples buffered towards the next resample window.
    pub fn pending_samples(&self) -> usize {
        self.accumulator.len()
    }

    /// Zero filter state and drop any partial window.
    pub fn reset(&mut self) {
        self.source_filter.reset();
        self.resampled_filter.reset();
        self.accumulator.clear();
    }

    /// Run one interleaved stereo block through the chain.
    ///
    /// The block is filtered in place. Non-finite samples are replaced with
    /// silence first. Returns the number of items enqueued.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OddSampleCount`] for a block that does not
    /// hold whole stereo frames; nothing is processed in that case.
    pub fn process_block(&mut self, block: &mut [f32]) -> Result<usize, ValidationError> {
        if !block.len().is_multiple_of(CHANNELS) {
            return Err(ValidationError::odd_sample_count(block.len()));
        }

        let mut non_finite = 0u64;
        for sample in block.iter_mut().filter(|s| !s.is_finite()) {
            *sample = 0.0;
            non_finite += 1;
        }
        if non_finite > 0 {
            self.counters.add_non_finite(non_finite);
        }
        self.counters.record_block((block.len() / CHANNELS) as u64);

        self.source_filter.apply_interleaved(block);

        match &self.output {
            SessionOutput::Usb(queue) => {
                let mut pushed = 0usize;
                for frame in block.chunks_exact(CHANNELS) {
                    if let [left, right] = frame {
                        queue.push(encode_usb_frame(*left, *right));
                        pushed += 1;
                    }
                }
                self.counters.add_samples_produced(pushed as u64);
                Ok(pushed)
            }
            SessionOutput::Bluetooth(queue) => {
                self.accumulator.push(block)?;
                let mut pushed = 0usize;
                while self.accumulator.pop_block(&mut self.window) {
                    let mut resampled = resample_block(&self.window);
                    self.resampled_filter.apply_interleaved(&mut resampled);
                    let [first, second] = encode_bt_block(&resampled);
                    queue.push(first);
                    queue.push(second);
                    pushed += 2;
                    self.counters.inc_resample_cycle();
                }
                self.counters.add_packets_produced(pushed as u64);
                Ok(pushed)
            }
        }
    }
}
