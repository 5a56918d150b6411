//! Trailing-edge debouncing driven by caller-supplied instants.
//!
//! Hosts feed every raw event into [`Debouncer::trigger`] and call
//! [`Debouncer::poll`] from their timer tick; the debouncer fires once,
//! `delay` after the last event of a burst.

use std::time::{Duration, Instant};

/// Trailing-edge debouncer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an event at `now`, pushing the pending deadline out.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Whether an evaluation is scheduled.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Instant at which the pending evaluation becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once per burst, when `now` reaches the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending evaluation.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
