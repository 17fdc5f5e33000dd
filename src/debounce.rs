//! Cancellable single-slot timer used to debounce rapid input.
//!
//! Only the most recent value is kept: scheduling while a value is pending replaces it and
//! restarts the quiet window. Time is always passed in, never read from the clock, so the
//! last-write-wins behaviour is reproducible in tests.

use std::time::{Duration, Instant};

/// Default quiet window for search input.
pub const DEBOUNCE_MS: u64 = 300;

#[derive(Debug)]
/// Holds at most one pending value until its quiet window has elapsed.
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    /// Creates an idle debouncer with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedules `value` to fire one window after `now`, discarding any pending value.
    ///
    /// Returns whether a pending value was superseded.
    pub fn schedule(&mut self, value: T, now: Instant) -> bool {
        let superseded = self.pending.is_some();
        self.pending = Some((now + self.window, value));
        superseded
    }

    /// Drops the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    /// Takes the pending value if its deadline has passed.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if now >= deadline => self.cancel(),
            _ => None,
        }
    }

    #[must_use]
    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    #[must_use]
    /// Whether a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    /// The configured quiet window.
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

#[cfg(test)]
#[path = "tests/debounce.rs"]
mod tests;
