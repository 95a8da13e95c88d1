//! Cancellable timer used to coalesce keystrokes into a single lookup.
//!
//! The debouncer never sleeps or spawns anything: the owner passes in the
//! current time and asks whether the pending item is due. This keeps the
//! event loop single-threaded and lets tests drive time explicitly.

use std::time::{Duration, Instant};

/// Default quiet period before a lookup is issued
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Holds at most one scheduled item together with its deadline
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Cancel whatever is pending and arm a new deadline at `now + delay`.
    pub fn schedule(&mut self, item: T, now: Instant) {
        self.pending = Some((item, now + self.delay));
    }

    /// Take the pending item if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => self.pending.take().map(|(item, _)| item),
            _ => None,
        }
    }

    /// Drop the pending item, returning it if there was one.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(item, _)| item)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending item becomes due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Time left until the pending item is due (zero if already due)
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|deadline| deadline.saturating_duration_since(now))
    }
}
