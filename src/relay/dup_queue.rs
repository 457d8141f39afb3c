//! Bounded delayed-send queue for UDP duplicate emission (spec §4.6, §9).
//!
//! Grounded on spec §9's "Duplicate queue" note: a fixed-size ring with an
//! explicit `due_at`, drained at the top of every scheduler tick before
//! reading sockets, bounding latency regardless of traffic.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::time::Instant;

use crate::config::limits::DUP_QUEUE_CAPACITY;

pub struct DupEntry {
    pub dest: SocketAddr,
    pub payload: Vec<u8>,
    pub due_at: Instant,
}

pub struct DupQueue {
    entries: VecDeque<DupEntry>,
    pub dropped: u64,
}

impl DupQueue {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(DUP_QUEUE_CAPACITY),
            dropped: 0,
        }
    }

    /// Enqueue a duplicate send. Overflow counts as a drop rather than
    /// blocking or evicting (spec §4.6 "queue overflow counts as a drop").
    pub fn push(&mut self, dest: SocketAddr, payload: Vec<u8>, due_at: Instant) {
        if self.entries.len() >= DUP_QUEUE_CAPACITY {
            self.dropped += 1;
            return;
        }
        self.entries.push_back(DupEntry { dest, payload, due_at });
    }

    /// Remove and return every entry due by `now`, in enqueue order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<DupEntry> {
        let mut due = Vec::new();
        while let Some(front) = self.entries.front() {
            if front.due_at > now {
                break;
            }
            due.push(self.entries.pop_front().unwrap());
        }
        due
    }
}

impl Default for DupQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn addr() -> SocketAddr {
        "127.0.0.1:9000".parse().unwrap()
    }

    #[test]
    fn drain_due_returns_only_expired_entries_in_order() {
        let mut q = DupQueue::new();
        let now = Instant::now();
        q.push(addr(), vec![1], now);
        q.push(addr(), vec![2], now + Duration::from_secs(10));
        let due = q.drain_due(now);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].payload, vec![1]);
    }

    #[test]
    fn overflow_counts_as_drop_not_eviction() {
        let mut q = DupQueue::new();
        let now = Instant::now();
        for i in 0..DUP_QUEUE_CAPACITY {
            q.push(addr(), vec![i as u8], now + Duration::from_secs(1000));
        }
        q.push(addr(), vec![255], now + Duration::from_secs(1000));
        assert_eq!(q.dropped, 1);
        assert_eq!(q.entries.len(), DUP_QUEUE_CAPACITY);
    }
}
