//! Producer-to-delivery transfer queue.
//!
//! One queue exists per active session. The producer thread pushes encoded
//! packets or sample pairs, the delivery tick pops them in FIFO order.
//!
//! # RT Safety
//!
//! - `push` never blocks and never fails; storage grows in segments
//! - `try_pop` returns immediately with `None` when empty
//! - Lock-free, so a stalled consumer never holds up the producer

use crossbeam::queue::SegQueue;

/// Unbounded FIFO of encoded haptic items.
///
/// # Example
///
/// ```rust
/// use dualhaptics_atomic::TransferQueue;
///
/// let queue = TransferQueue::new();
/// queue.push(1u8);
/// queue.push(2u8);
/// assert_eq!(queue.try_pop(), Some(1));
/// assert_eq!(queue.try_pop(), Some(2));
/// assert!(queue.try_pop().is_none());
/// ```
#[derive(Debug)]
pub struct TransferQueue<T> {
    items: SegQueue<T>,
}

impl<T> Default for TransferQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TransferQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: SegQueue::new(),
        }
    }

    /// Append an item at the back.
    #[inline]
    pub fn push(&self, item: T) {
        self.items.push(item);
    }

    /// Remove the item at the front, if any.
    #[inline]
    pub fn try_pop(&self) -> Option<T> {
        self.items.pop()
    }

    /// Whether the queue holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of queued items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Discard every queued item and return how many were dropped.
    pub fn clear(&self) -> usize {
        let mut discarded = 0usize;
        while self.items.pop().is_some() {
            discarded = discarded.saturating_add(1);
        }
        discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let queue = TransferQueue::new();
        for i in 0..10 {
            queue.push(i);
        }
        assert_eq!(queue.len(), 10);
        for i in 0..10 {
            assert_eq!(queue.try_pop(), Some(i));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_empty_pop() {
        let queue: TransferQueue<u32> = TransferQueue::default();
        assert!(queue.try_pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_counts_discarded() {
        let queue = TransferQueue::new();
        queue.push("a");
        queue.push("b");
        queue.push("c");
        assert_eq!(queue.clear(), 3);
        assert!(queue.is_empty());
        assert_eq!(queue.clear(), 0);
    }
}
