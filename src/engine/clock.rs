use std::time::{Duration, Instant};

/// Ticks owed after a stall are capped so the loop never spirals.
const MAX_CATCH_UP: u32 = 5;

/// Fixed-step scheduler for the frame driver.
#[derive(Debug, Clone)]
pub struct TickClock {
    step: Duration,
    next: Instant,
}

impl TickClock {
    pub fn new(step: Duration, now: Instant) -> Self {
        let step = step.max(Duration::from_millis(1));
        Self { step, next: now + step }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// How long input polling may block before the next tick is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Number of ticks to run now; advances the deadline past `now`.
    pub fn due(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while self.next <= now {
            self.next += self.step;
            ticks += 1;
        }
        if ticks > MAX_CATCH_UP {
            tracing::debug!(skipped = ticks - MAX_CATCH_UP, "tick clock fell behind");
            ticks = MAX_CATCH_UP;
        }
        ticks
    }
}
