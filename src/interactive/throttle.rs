use std::time::{Duration, Instant};

/// Admits at most one action per interval on a monotonic clock
#[derive(Debug, Clone)]
pub struct PollThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl PollThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True (and the window restarts) if `interval` has passed since the last admit
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
