use std::time::{Duration, Instant};

/// Default loop period of the walk animation
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(20_000);

/// Repeating progress clock.
///
/// Progress is a pure function of elapsed time: `(elapsed mod period) / period`.
/// It ramps from 0 towards 1 and jumps straight back to 0 at every period
/// boundary.
#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    origin: Instant,
    period: Duration,
}

impl AnimationClock {
    /// Create clock whose time origin is now
    pub fn new(period: Duration) -> Self {
        Self::with_origin(Instant::now(), period)
    }

    pub fn with_origin(origin: Instant, period: Duration) -> Self {
        Self { origin, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time since the clock origin
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.origin)
    }

    /// Progress fraction in [0, 1) at wall-clock instant `now`
    pub fn progress_at(&self, now: Instant) -> f32 {
        self.progress(self.elapsed(now))
    }

    /// Progress fraction in [0, 1) after `elapsed`
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let period = self.period.as_nanos();
        if period == 0 {
            return 0.0;
        }
        let phase = elapsed.as_nanos() % period;
        (phase as f64 / period as f64) as f32
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}
