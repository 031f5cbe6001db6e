//! Shared state between tasks
//!
//! The UART receive task only appends to the queue; the control task is
//! the only reader. Both sides hold the lock for a few bytes at most.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use sysmon_protocol::{ByteSource, RxQueue};

/// Bytes received from the host, waiting to be framed
pub static RX_QUEUE: Mutex<CriticalSectionRawMutex, RefCell<RxQueue>> =
    Mutex::new(RefCell::new(RxQueue::new()));

/// Run `f` with exclusive access to the receive queue
pub fn with_rx_queue<R>(f: impl FnOnce(&mut RxQueue) -> R) -> R {
    RX_QUEUE.lock(|queue| f(&mut queue.borrow_mut()))
}

/// Consumer handle on [`RX_QUEUE`]
///
/// Locks per access, so display and UART writes made while framing never
/// run inside the critical section.
pub struct SharedRxQueue;

impl ByteSource for SharedRxQueue {
    fn available(&self) -> usize {
        with_rx_queue(|queue| queue.available())
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        with_rx_queue(|queue| queue.peek(offset))
    }

    fn pop(&mut self) -> Option<u8> {
        with_rx_queue(|queue| queue.pop())
    }

    fn discard_all(&mut self) {
        with_rx_queue(|queue| queue.discard_all())
    }
}
