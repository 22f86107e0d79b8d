//! Human pacing between UI actions
//!
//! All waits in a campaign go through a `Pacer`, so tests can run the full
//! state machine with `NoDelay` and production runs sleep for randomized
//! intervals.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::trace;

use crate::config::{DelayRange, PacingConfig};

/// Strategy for the pause between two UI actions
pub trait Pacer: Send + Sync {
    fn pause(&self, range: DelayRange) -> impl Future<Output = ()> + Send;
}

/// Sleeps for a uniformly sampled duration within the range
#[derive(Debug, Clone, Copy)]
pub struct HumanPacer {
    unit_ms: u64,
}

impl HumanPacer {
    #[must_use]
    pub fn new(unit: Duration) -> Self {
        Self {
            unit_ms: u64::try_from(unit.as_millis()).unwrap_or(u64::MAX),
        }
    }

    #[must_use]
    pub fn from_config(config: &PacingConfig) -> Self {
        Self {
            unit_ms: config.unit_ms,
        }
    }

    /// Sample a pause with millisecond jitter inside `[min, max]` units
    ///
    /// An inverted range is treated as its lower bound.
    #[must_use]
    pub fn sample(&self, range: DelayRange) -> Duration {
        let lo = range.min.saturating_mul(self.unit_ms);
        let hi = range.max.saturating_mul(self.unit_ms);
        if hi <= lo {
            return Duration::from_millis(lo);
        }
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}

impl Pacer for HumanPacer {
    async fn pause(&self, range: DelayRange) {
        let delay = self.sample(range);
        trace!("Pausing {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    async fn pause(&self, _range: DelayRange) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_within_scaled_range() {
        let pacer = HumanPacer::new(Duration::from_millis(10));
        let range = DelayRange::new(7, 15);
        for _ in 0..200 {
            let d = pacer.sample(range);
            assert!(d >= Duration::from_millis(70) && d <= Duration::from_millis(150));
        }
    }

    #[test]
    fn degenerate_range_is_exact() {
        let pacer = HumanPacer::new(Duration::from_millis(5));
        assert_eq!(pacer.sample(DelayRange::new(3, 3)), Duration::from_millis(15));
        assert_eq!(pacer.sample(DelayRange::new(9, 2)), Duration::from_millis(45));
        assert_eq!(pacer.sample(DelayRange::zero()), Duration::ZERO);
    }
}
