// Periodic callback driven by the UI loop instead of a background thread

use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct FrameTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.next_due = Some(now + interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True when the callback is due at `now`; schedules the following one.
    ///
    /// Fires at most once per poll. A timer that fell behind skips ahead
    /// instead of firing a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = due + self.interval;
                self.next_due = Some(if next <= now { now + self.interval } else { next });
                true
            }
            _ => false,
        }
    }

    /// Time left until the next callback, if the timer is running.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
