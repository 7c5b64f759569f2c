#![forbid(unsafe_code)]

//! One-shot timers on a virtual clock.
//!
//! The queue keeps its own notion of "now", advanced only by
//! [`TimerQueue::advance`]. Timers fire in deadline order; timers sharing a
//! deadline fire in the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerTicket(u64);

#[derive(Debug)]
struct Scheduled<T> {
    deadline: Duration,
    seq: u64,
    payload: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: the earliest deadline, then the lowest sequence, is greatest.
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Deterministic queue of pending one-shot timers.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    heap: BinaryHeap<Scheduled<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            heap: BinaryHeap::new(),
        }
    }

    /// Virtual time elapsed since the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Schedule `payload` to fire `delay` from now.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerTicket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled {
            deadline: self.now.saturating_add(delay),
            seq,
            payload,
        });
        TimerTicket(seq)
    }

    /// Remove a pending timer. Returns its payload if it had not fired yet.
    pub fn cancel(&mut self, ticket: TimerTicket) -> Option<T> {
        let mut items = std::mem::take(&mut self.heap).into_vec();
        let found = items
            .iter()
            .position(|s| s.seq == ticket.0)
            .map(|i| items.swap_remove(i).payload);
        self.heap = items.into();
        found
    }

    /// Whether `ticket` is still pending.
    pub fn contains(&self, ticket: TimerTicket) -> bool {
        self.heap.iter().any(|s| s.seq == ticket.0)
    }

    /// Time left until the earliest pending timer fires.
    pub fn next_due(&self) -> Option<Duration> {
        self.heap
            .peek()
            .map(|s| s.deadline.saturating_sub(self.now))
    }

    /// Move the clock forward by `dt` and return every payload that came due,
    /// earliest first.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.now = self.now.saturating_add(dt);
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|s| s.deadline <= self.now) {
            if let Some(s) = self.heap.pop() {
                due.push(s.payload);
            }
        }
        due
    }

    /// Remove every pending timer, returning payloads in firing order.
    pub fn drain(&mut self) -> Vec<T> {
        let mut items = std::mem::take(&mut self.heap).into_sorted_vec();
        // `into_sorted_vec` is ascending by `Ord`, which is latest-first here.
        items.reverse();
        items.into_iter().map(|s| s.payload).collect()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) -> usize {
        let n = self.heap.len();
        self.heap.clear();
        n
    }
}
