use std::time::Duration;

use tokio::time::Instant;

/// Recurring flush deadline for one aggregator.
///
/// An unwindowed aggregator (interval 0) ticks on a 1ms floor so the event
/// loop never spins.
#[derive(Clone)]
pub(crate) struct FlushTimer {
    interval: Duration,
    deadline: Instant,
}

impl FlushTimer {
    pub(crate) fn new(interval_ms: u64) -> Self {
        let interval = Duration::from_millis(interval_ms.max(1));
        Self {
            interval,
            deadline: Instant::now() + interval,
        }
    }

    /// Re-arms the timer for one interval from now.
    pub(crate) fn reset(&mut self) {
        self.deadline = Instant::now() + self.interval;
    }

    pub(crate) fn next_deadline(&self) -> Instant {
        self.deadline
    }

    pub(crate) fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub(crate) fn is_expired(&self) -> bool {
        self.deadline <= Instant::now()
    }
}
