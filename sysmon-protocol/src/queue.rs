//! Bounded receive queue between the UART producer and the frame reader
//!
//! The producer side only pushes raw bytes; it never parses. When the
//! queue is full the newest byte is dropped and counted.

use heapless::Deque;

/// Default receive queue capacity
pub const RX_QUEUE_SIZE: usize = 256;

/// Source of already-received bytes for the frame reader
pub trait ByteSource {
    /// Number of bytes that can be popped right now
    fn available(&self) -> usize;

    /// Look at a queued byte without consuming it
    fn peek(&self, offset: usize) -> Option<u8>;

    /// Remove and return the oldest byte
    fn pop(&mut self) -> Option<u8>;

    /// Drop everything currently queued
    fn discard_all(&mut self) {
        while self.pop().is_some() {}
    }
}

/// Fixed-capacity FIFO of received bytes with an overflow counter
#[derive(Debug, Clone)]
pub struct RxQueue<const N: usize = RX_QUEUE_SIZE> {
    bytes: Deque<u8, N>,
    dropped: u32,
}

impl<const N: usize> Default for RxQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RxQueue<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            bytes: Deque::new(),
            dropped: 0,
        }
    }

    /// Enqueue one byte
    ///
    /// Returns false if the queue was full and the byte was dropped.
    pub fn push(&mut self, byte: u8) -> bool {
        match self.bytes.push_back(byte) {
            Ok(()) => true,
            Err(_) => {
                self.dropped = self.dropped.saturating_add(1);
                false
            }
        }
    }

    /// Enqueue a run of bytes, returning how many were accepted
    pub fn extend(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().filter(|&&b| self.push(b)).count()
    }

    /// Discard everything queued
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Number of queued bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Total bytes dropped because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Return the drop count and reset it to zero
    pub fn take_dropped(&mut self) -> u32 {
        core::mem::take(&mut self.dropped)
    }
}

impl<const N: usize> ByteSource for RxQueue<N> {
    fn available(&self) -> usize {
        self.bytes.len()
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.iter().nth(offset).copied()
    }

    fn pop(&mut self) -> Option<u8> {
        self.bytes.pop_front()
    }

    fn discard_all(&mut self) {
        self.bytes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue: RxQueue<8> = RxQueue::new();
        queue.extend(&[1, 2, 3]);

        assert_eq!(queue.peek(0), Some(1));
        assert_eq!(queue.peek(2), Some(3));
        assert_eq!(queue.peek(3), None);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.available(), 1);
    }

    #[test]
    fn test_overflow_drops_newest_and_counts() {
        let mut queue: RxQueue<4> = RxQueue::new();
        let accepted = queue.extend(&[1, 2, 3, 4, 5, 6]);

        assert_eq!(accepted, 4);
        assert_eq!(queue.dropped(), 2);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.peek(2), Some(4));
    }

    #[test]
    fn test_take_dropped_resets_counter() {
        let mut queue: RxQueue<1> = RxQueue::new();
        queue.push(1);
        assert!(!queue.push(2));

        assert_eq!(queue.take_dropped(), 1);
        assert_eq!(queue.dropped(), 0);
    }

    #[test]
    fn test_clear() {
        let mut queue: RxQueue<8> = RxQueue::new();
        queue.extend(&[9, 9, 9]);
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }
}
