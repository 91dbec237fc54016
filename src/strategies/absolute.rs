//! # Absolute strategy: fixed configured minutes.

use std::time::Duration;

use crate::error::StrategyError;
use crate::jobs::Job;
use crate::strategies::Strategy;

/// Fixed timeout of a configured number of minutes.
///
/// The simplest policy: a job may run `minutes` and not a moment longer
/// (subject to the supervisor's floor clamp).
#[derive(Clone, Copy, Debug)]
pub struct AbsoluteStrategy {
    /// Allowed run time in minutes.
    pub minutes: u64,
}

impl AbsoluteStrategy {
    /// Creates a strategy allowing `minutes` of run time.
    pub fn new(minutes: u64) -> Self {
        Self { minutes }
    }
}

impl Strategy for AbsoluteStrategy {
    fn name(&self) -> &'static str {
        "absolute"
    }

    fn compute(&self, _job: &dyn Job) -> Result<Duration, StrategyError> {
        Ok(Duration::from_secs(self.minutes * 60))
    }
}
