use std::time::{Duration, Instant};

/// Fixed-period timer polled by a single-threaded loop.
///
/// A cancelled timer never fires until it is armed again.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    /// Creates a disarmed timer.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        debug_assert!(!period.is_zero(), "timer period must be positive");
        Self {
            period,
            next_due: None,
        }
    }

    /// Schedules the first firing one period after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true at most once per period.
    ///
    /// Firing keeps the fixed cadence; when the loop fell more than a full
    /// period behind, missed firings are skipped rather than replayed.
    pub fn fire(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let next = due + self.period;
        self.next_due = Some(if next <= now { now + self.period } else { next });
        true
    }

    /// Time left until the next firing; `None` when disarmed.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
