#![forbid(unsafe_code)]

//! Tick-driven countdown used for auto-expiring grid state.
//!
//! A [`Deadline`] counts down only when the host feeds it elapsed time via
//! [`Deadline::tick`], which keeps expiry deterministic under test and free of
//! background threads. Whoever owns a deadline owns its expiry: replacing the
//! deadline (rather than scheduling a second one) is what guarantees that a
//! superseded timer can never fire against newer state.
//!
//! # Example
//!
//! ```rust
//! use rubric_grid::deadline::Deadline;
//! use std::time::Duration;
//!
//! let mut deadline = Deadline::new(Duration::from_secs(4));
//! assert!(!deadline.tick(Duration::from_secs(3)));
//! assert_eq!(deadline.remaining(), Duration::from_secs(1));
//! assert!(deadline.tick(Duration::from_secs(1)));
//! assert!(!deadline.tick(Duration::from_secs(1)));
//! ```

use std::time::Duration;

/// A one-shot countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deadline {
    remaining: Duration,
    fired: bool,
}

impl Deadline {
    /// Start a countdown of `duration`.
    ///
    /// A zero duration is already expired, but still reports that once on
    /// the next tick.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            remaining: duration,
            fired: false,
        }
    }

    /// Time left before expiry.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Whether the countdown has reached zero.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Subtract `delta` from the remaining time.
    ///
    /// Returns `true` exactly once: on the tick that observes expiry.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.fired {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(delta);
        if self.expired() {
            self.fired = true;
            true
        } else {
            false
        }
    }
}
