use std::time::Duration;

/// Reconnect delay policy, injectable so the connection owner can be tested
/// without waiting on real delays.
pub trait BackoffPolicy: Send {
    /// Delay to wait before the next connection attempt.
    fn next_delay(&mut self) -> Duration;
    /// Called after a connection is successfully established.
    fn reset(&mut self);
}

/// Doubling backoff: min, 2*min, 4*min, ... capped at max.
#[derive(Debug, Clone)]
pub struct DoublingBackoff {
    min: Duration,
    max: Duration,
    current: Duration,
}

impl DoublingBackoff {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max, current: min }
    }
}

impl BackoffPolicy for DoublingBackoff {
    fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current + self.current).min(self.max);
        delay
    }

    fn reset(&mut self) {
        self.current = self.min;
    }
}
