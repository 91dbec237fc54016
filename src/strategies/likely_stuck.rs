//! # Likely-stuck strategy: generous multiple of the expected duration.
//!
//! Allows ten times the host's estimate of the remaining run time, or a
//! 24-hour fallback when no estimate exists. Meant as a stuck-job detector,
//! not a tight deadline.

use std::time::Duration;

use crate::error::StrategyError;
use crate::jobs::Job;
use crate::strategies::Strategy;

/// Multiple applied to the estimated remaining duration.
const STUCK_MULTIPLIER: u32 = 10;

/// Budget when the host has no duration estimate.
const NO_ESTIMATE_FALLBACK: Duration = Duration::from_secs(24 * 3600);

/// Fires when a job runs an order of magnitude past its estimate.
#[derive(Clone, Copy, Debug, Default)]
pub struct LikelyStuckStrategy;

impl LikelyStuckStrategy {
    /// Creates a likely-stuck strategy.
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for LikelyStuckStrategy {
    fn name(&self) -> &'static str {
        "likely_stuck"
    }

    fn compute(&self, job: &dyn Job) -> Result<Duration, StrategyError> {
        Ok(match job.estimated_remaining() {
            Some(remaining) => remaining.saturating_mul(STUCK_MULTIPLIER),
            None => NO_ESTIMATE_FALLBACK,
        })
    }
}
