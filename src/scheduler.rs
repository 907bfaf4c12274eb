//! Deadline-ordered timer queue driven by an injected clock.
//!
//! The queue never reads the wall clock. Hosts pass `now` as the time
//! elapsed since they started and call [`TimerQueue::pop_due`] from their
//! frame loop or event handler.

use std::collections::BTreeMap;
use std::time::Duration;

/// Single scheduler for many independent timers.
///
/// Entries with equal deadlines fire in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: BTreeMap<(Duration, u64), T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Schedules `payload` to fire at `deadline`
    pub fn schedule_at(&mut self, deadline: Duration, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((deadline, seq), payload);
    }

    /// Pops the earliest entry whose deadline is at or before `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, T)> {
        let (&(deadline, _), _) = self.entries.first_key_value()?;
        if deadline > now {
            return None;
        }
        self.entries
            .pop_first()
            .map(|((deadline, _), payload)| (deadline, payload))
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
