//! Cancellable one-shot timers.
//!
//! The scheduler never sleeps on its own. Owners ask for the next deadline,
//! wait for it however their event loop waits, then drain whatever is due.
//! Deadlines use `tokio::time::Instant` so a paused test clock drives them.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Scheduled<T> {
    id: TimerId,
    due: Instant,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to become due `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(Scheduled {
            id,
            due: Instant::now() + delay,
            task,
        });
        id
    }

    /// Cancels a pending timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.id != id);
        self.pending.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|entry| entry.id == id)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|entry| entry.due).min()
    }

    /// Removes and returns the earliest task due at `now`. Ties go to the
    /// task scheduled first. Popping one task at a time lets a task cancel
    /// others that fall due at the same instant.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerId, T)> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= now)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(position, _)| position)?;
        let entry = self.pending.swap_remove(position);
        Some((entry.id, entry.task))
    }

    /// Drops every pending timer, returning how many were cancelled.
    pub fn clear(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
