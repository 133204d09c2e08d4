//! Fixed-rate tick clock.
//!
//! Deadlines sit on a fixed grid `start + n * period`. When a tick fires
//! late enough that later deadlines have already passed, those ticks are
//! skipped instead of replayed in a burst and the clock moves to the next
//! future grid point.

use std::time::Duration;
use tokio::time::Instant;

/// Timing report for one fired tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTiming {
    /// 1-based number of this tick
    pub tick: u64,
    /// How late the tick fired relative to its deadline
    pub drift: Duration,
    /// Deadlines passed over since the previous tick
    pub skipped: u64,
}

#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    start: Instant,
    deadline: Instant,
    tick_count: u64,
    skipped_total: u64,
    last_drift: Duration,
}

impl TickClock {
    pub fn new(tick_rate_hz: u32, start: Instant) -> Self {
        let period = Duration::from_secs_f64(1.0 / tick_rate_hz.max(1) as f64);
        Self {
            period,
            start,
            deadline: start + period,
            tick_count: 0,
            skipped_total: 0,
            last_drift: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// When the next tick is due.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Record that a tick fired at `now` and schedule the next deadline.
    pub fn advance(&mut self, now: Instant) -> TickTiming {
        let drift = now.saturating_duration_since(self.deadline);
        let period_nanos = self.period.as_nanos().max(1);
        let skipped = (drift.as_nanos() / period_nanos) as u64;

        let steps = u32::try_from(skipped + 1).unwrap_or(u32::MAX);
        self.deadline += self.period * steps;
        self.tick_count += 1;
        self.skipped_total += skipped;
        self.last_drift = drift;

        TickTiming {
            tick: self.tick_count,
            drift,
            skipped,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn skipped_total(&self) -> u64 {
        self.skipped_total
    }

    pub fn last_drift(&self) -> Duration {
        self.last_drift
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start)
    }
}
