use std::time::{Duration, Instant};

/// Tick period for a frame rate: `1000ms / max(1, fps)`, truncated to whole milliseconds.
pub fn tick_period(fps: f64) -> Duration {
    let fps = if fps.is_finite() { fps.max(1.0) } else { 1.0 };
    Duration::from_millis((1000.0 / fps) as u64)
}

/// Restartable fixed-period timer polled from the UI loop.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_fire: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_fire: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    pub fn start(&mut self, now: Instant) {
        self.next_fire = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_fire = None;
    }

    /// Returns true if a tick is due; at most one per call.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_fire {
            Some(due) if now >= due => {
                // Schedule from now so a stalled UI doesn't trigger a burst of ticks
                self.next_fire = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, if running.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_fire.map(|due| due.saturating_duration_since(now))
    }
}
