//! Packet-Queue Handler: a bounded, blocking single-producer/single-consumer queue, matching the
//! original's pthread mutex-and-condvar handoff queue rather than reaching for an async channel —
//! this crate's concurrency model is threads, not a runtime.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

struct Inner {
    items: VecDeque<Vec<u8>>,
    closed: bool,
}

/// A bounded queue of byte buffers, handed off between a producer thread (reading off the wire)
/// and a consumer thread (running the framer and parsers). `send` blocks while the queue is full;
/// `recv` blocks while it is empty. Once [`PacketQueue::close`] is called, a blocked `send` fails
/// and a blocked `recv` drains whatever remains before reporting the queue empty.
pub struct PacketQueue {
    capacity: usize,
    state: Mutex<Inner>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl PacketQueue {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "a zero-capacity queue can never be sent to");
        Self {
            capacity,
            state: Mutex::new(Inner {
                items: VecDeque::new(),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Blocks until there is room, then enqueues `item`. Returns `false` without enqueuing if the
    /// queue has been closed.
    pub fn send(&self, item: Vec<u8>) -> bool {
        let mut inner = self.state.lock().unwrap();
        loop {
            if inner.closed {
                return false;
            }
            if inner.items.len() < self.capacity {
                inner.items.push_back(item);
                self.not_empty.notify_one();
                return true;
            }
            inner = self.not_full.wait(inner).unwrap();
        }
    }

    /// Blocks until an item is available or the queue is closed and drained, whichever comes
    /// first. Returns `None` only once closed with nothing left to deliver.
    pub fn recv(&self) -> Option<Vec<u8>> {
        let mut inner = self.state.lock().unwrap();
        loop {
            if let Some(item) = inner.items.pop_front() {
                self.not_full.notify_one();
                return Some(item);
            }
            if inner.closed {
                return None;
            }
            inner = self.not_empty.wait(inner).unwrap();
        }
    }

    /// Wakes every blocked `send` and `recv`. Already-queued items remain available to `recv`
    /// until drained; `send` after `close` always fails.
    pub fn close(&self) {
        let mut inner = self.state.lock().unwrap();
        inner.closed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn send_then_recv_round_trips() {
        let queue = PacketQueue::new(4);
        assert!(queue.send(vec![1, 2, 3]));
        assert_eq!(Some(vec![1, 2, 3]), queue.recv());
    }

    #[test]
    fn recv_blocks_until_send_wakes_it() {
        let queue = Arc::new(PacketQueue::new(1));
        let reader = Arc::clone(&queue);
        let handle = thread::spawn(move || reader.recv());
        thread::sleep(Duration::from_millis(20));
        queue.send(vec![9]);
        assert_eq!(Some(vec![9]), handle.join().unwrap());
    }

    #[test]
    fn send_blocks_until_capacity_frees_up() {
        let queue = Arc::new(PacketQueue::new(1));
        assert!(queue.send(vec![1]));
        let writer = Arc::clone(&queue);
        let handle = thread::spawn(move || writer.send(vec![2]));
        thread::sleep(Duration::from_millis(20));
        assert_eq!(1, queue.len());
        assert_eq!(Some(vec![1]), queue.recv());
        assert!(handle.join().unwrap());
        assert_eq!(Some(vec![2]), queue.recv());
    }

    #[test]
    fn close_wakes_a_blocked_recv_with_none() {
        let queue = Arc::new(PacketQueue::new(1));
        let reader = Arc::clone(&queue);
        let handle = thread::spawn(move || reader.recv());
        thread::sleep(Duration::from_millis(20));
        queue.close();
        assert_eq!(None, handle.join().unwrap());
    }

    #[test]
    fn close_drains_before_reporting_empty() {
        let queue = PacketQueue::new(4);
        queue.send(vec![1]);
        queue.close();
        assert_eq!(Some(vec![1]), queue.recv());
        assert_eq!(None, queue.recv());
    }

    #[test]
    fn send_after_close_fails() {
        let queue = PacketQueue::new(4);
        queue.close();
        assert!(!queue.send(vec![1]));
    }
}
