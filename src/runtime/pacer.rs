use std::time::{Duration, Instant};

/// Shortest pause between loop iterations, even when a frame overran.
pub const MIN_SLEEP: Duration = Duration::from_micros(100);

/// Fixed-period frame pacing.
///
/// Pacing is best effort: an iteration that overruns the period is followed
/// by the next one right away, and missed frames are never made up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePacer {
    period: Duration,
}

impl FramePacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_SLEEP),
        }
    }

    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_nanos(1_000_000_000 / u64::from(fps.max(1))))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_due(&self, now: Instant, last_frame: Option<Instant>) -> bool {
        match last_frame {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.period,
        }
    }

    pub fn sleep_after(&self, spent: Duration) -> Duration {
        self.period.saturating_sub(spent).max(MIN_SLEEP)
    }

    /// Whole frame periods that fit in `window`.
    pub fn expected_frames(&self, window: Duration) -> u64 {
        let frames = window.as_nanos() / self.period.as_nanos();
        u64::try_from(frames).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/pacer.rs"]
mod tests;
