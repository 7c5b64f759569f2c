#![forbid(unsafe_code)]

//! Wall-clock adapter for callers that run a real event loop.

use std::time::{Duration, Instant};

/// Converts successive [`Instant`] readings into tick deltas.
///
/// The first reading yields zero. An optional cap bounds a single delta; time
/// beyond the cap is dropped, not carried into later deltas, so after a stall
/// pending commits fire later than their wall-clock deadline.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    max_step: Option<Duration>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap every delta at `max_step` (builder).
    #[must_use]
    pub fn with_max_step(mut self, max_step: Duration) -> Self {
        self.max_step = Some(max_step);
        self
    }

    /// Delta since the previous reading.
    pub fn delta(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        match self.max_step {
            Some(cap) => dt.min(cap),
            None => dt,
        }
    }

    /// Delta since the previous reading, reading the clock now.
    pub fn tick(&mut self) -> Duration {
        self.delta(Instant::now())
    }

    /// Forget the previous reading.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
