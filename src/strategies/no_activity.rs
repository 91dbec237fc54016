//! # No-activity strategy: quiet-period watchdog.
//!
//! The budget is a fixed quiet period, but unlike every other strategy the
//! deadline is **re-armed on each output event** from the job: the supervisor
//! cancels the current timer and arms a fresh one whenever
//! [`Supervisor::on_activity`](crate::Supervisor::on_activity) is invoked.
//! The chain fires only if a full quiet period elapses with no output.

use std::time::Duration;

use crate::error::StrategyError;
use crate::jobs::Job;
use crate::strategies::Strategy;

/// Fires after `quiet` with no job output.
#[derive(Clone, Copy, Debug)]
pub struct NoActivityStrategy {
    /// Quiet period after which the job is considered silent.
    pub quiet: Duration,
}

impl NoActivityStrategy {
    /// Creates a no-activity strategy.
    pub fn new(quiet: Duration) -> Self {
        Self { quiet }
    }
}

impl Strategy for NoActivityStrategy {
    fn name(&self) -> &'static str {
        "no_activity"
    }

    fn compute(&self, _job: &dyn Job) -> Result<Duration, StrategyError> {
        Ok(self.quiet)
    }

    fn resets_on_activity(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::mock::MockJob;

    #[test]
    fn test_budget_is_quiet_period() {
        let job = MockJob::new("build-1");
        let s = NoActivityStrategy::new(Duration::from_secs(300));
        assert_eq!(s.compute(&job).unwrap(), Duration::from_secs(300));
    }

    #[test]
    fn test_resets_on_activity() {
        assert!(NoActivityStrategy::new(Duration::from_secs(1)).resets_on_activity());
    }
}
