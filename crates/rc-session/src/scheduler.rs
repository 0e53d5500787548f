//! A virtual-time task queue.
//!
//! The scheduler owns a millisecond clock that only moves when the caller
//! advances it. Tasks fire in due-time order, FIFO among equal due times.
//! Nothing here sleeps: a front-end maps real time onto [`Scheduler::pop_due`],
//! tests just jump the clock.

use std::collections::BTreeMap;

/// Handle to a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Queue of tasks keyed by due time.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_seq: u64,
    queue: BTreeMap<(u64, u64), T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Run `task` `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((self.now.saturating_add(delay_ms), seq), task);
        TimerHandle(seq)
    }

    /// Drop a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let key = self.queue.keys().find(|(_, seq)| *seq == handle.0).copied();
        match key {
            Some(key) => self.queue.remove(&key).is_some(),
            None => false,
        }
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<T> {
        let (&(due, seq), _) = self.queue.iter().next()?;
        if due > until {
            return None;
        }
        self.now = self.now.max(due);
        self.queue.remove(&(due, seq))
    }

    /// Move the clock forward to `time` without running anything.
    pub fn advance_to(&mut self, time: u64) {
        self.now = self.now.max(time);
    }

    /// Drop every pending task. The clock is left where it is.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(300, "c");
        s.schedule(100, "a");
        s.schedule(200, "b");

        let mut fired = Vec::new();
        while let Some(t) = s.pop_due(1_000) {
            fired.push((s.now(), t));
        }
        assert_eq!(fired, [(100, "a"), (200, "b"), (300, "c")]);
    }

    #[test]
    fn equal_due_times_are_fifo() {
        let mut s = Scheduler::new();
        s.schedule(0, 1);
        s.schedule(0, 2);
        s.schedule(0, 3);
        let fired: Vec<_> = std::iter::from_fn(|| s.pop_due(0)).collect();
        assert_eq!(fired, [1, 2, 3]);
    }

    #[test]
    fn pop_due_respects_horizon() {
        let mut s = Scheduler::new();
        s.schedule(500, ());
        assert!(s.pop_due(499).is_none());
        assert_eq!(s.now(), 0);
        assert!(s.pop_due(500).is_some());
        assert_eq!(s.now(), 500);
    }

    #[test]
    fn delays_are_relative_to_now() {
        let mut s = Scheduler::new();
        s.advance_to(1_000);
        s.schedule(250, ());
        assert_eq!(s.next_due(), Some(1_250));
    }

    #[test]
    fn cancel_pending() {
        let mut s = Scheduler::new();
        let h = s.schedule(100, "x");
        s.schedule(200, "y");
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert_eq!(s.pop_due(1_000), Some("y"));
    }

    #[test]
    fn cancel_after_fire_is_false() {
        let mut s = Scheduler::new();
        let h = s.schedule(0, ());
        s.pop_due(0);
        assert!(!s.cancel(h));
    }

    #[test]
    fn clear_keeps_clock() {
        let mut s = Scheduler::new();
        s.schedule(10, ());
        s.pop_due(10);
        s.schedule(10, ());
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        assert_eq!(s.now(), 10);
    }
}
