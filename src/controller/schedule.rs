use std::time::Duration;

use tokio::time::Instant;

/// The one pending tick of a game.
///
/// Arming replaces any earlier deadline, so there is never more than one
/// tick outstanding.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    interval: Duration,
    deadline: Option<Instant>,
}

impl TickSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Fire as soon as the loop gets to it
    pub fn arm_now(&mut self, now: Instant) {
        self.deadline = Some(now);
    }

    /// Fire one interval after `now`
    pub fn arm_after(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
