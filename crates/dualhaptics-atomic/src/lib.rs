//! # dualhaptics-atomic
//!
//! Concurrency primitives shared between a session's producer thread and the
//! delivery tick.
//!
//! ## Safety Guarantees
//!
//! - **No blocking operations**: queue push/pop and counter updates are lock-free
//! - **No syscalls** on the producer hot path
//! - **FIFO delivery** within one queue
//!
//! ## Architecture
//!
//! - [`queue`] - Unbounded [`TransferQueue`] of encoded haptic items
//! - [`counters`] - [`SessionCounters`] for pipeline observability
//!
//! ## Usage
//!
//! ```rust
//! use dualhaptics_atomic::{SessionCounters, TransferQueue};
//!
//! let queue = TransferQueue::new();
//! let counters = SessionCounters::new();
//!
//! // Producer side
//! queue.push(7u32);
//! counters.add_packets_produced(1);
//!
//! // Consumer side
//! while let Some(item) = queue.try_pop() {
//!     assert_eq!(item, 7);
//!     counters.add_delivered(1);
//! }
//! assert_eq!(counters.snapshot().items_delivered, 1);
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod counters;
pub mod queue;

pub use counters::{CounterSnapshot, SessionCounters};
pub use queue::TransferQueue;
