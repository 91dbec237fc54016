//! # Elastic strategy: percentage of the mean historical run duration.
//!
//! Walks the job's history strictly backward from the current run, collecting
//! up to `samples` completions whose outcome is no worse than unstable
//! (failed and aborted runs are skipped), and allows
//! `mean × percentage / 100`. With no qualifying history the configured
//! fallback applies instead.
//!
//! The fallback is used **only** when no qualifying samples exist; a computed
//! average below the fallback is kept as-is. The supervisor's floor clamp
//! still applies at arm time.

use std::time::Duration;

use crate::error::StrategyError;
use crate::jobs::Job;
use crate::strategies::Strategy;

/// History-based timeout: `percentage` of the mean of recent run durations.
#[derive(Clone, Copy, Debug)]
pub struct ElasticStrategy {
    /// Percentage of the historical mean to allow (e.g. `200` = 2×).
    pub percentage: u32,
    /// Maximum number of qualifying completions to average over.
    pub samples: usize,
    /// Budget to use when no qualifying history exists.
    pub fallback: Duration,
}

impl ElasticStrategy {
    /// Creates an elastic strategy.
    pub fn new(percentage: u32, samples: usize, fallback: Duration) -> Self {
        Self {
            percentage,
            samples,
            fallback,
        }
    }
}

impl Strategy for ElasticStrategy {
    fn name(&self) -> &'static str {
        "elastic"
    }

    fn compute(&self, job: &dyn Job) -> Result<Duration, StrategyError> {
        // History is newest-first; stop once enough samples are collected.
        let samples: Vec<Duration> = job
            .history()
            .iter()
            .filter(|run| run.outcome.qualifies_as_sample())
            .take(self.samples.max(1))
            .map(|run| run.duration)
            .collect();

        if samples.is_empty() {
            return Ok(self.fallback);
        }

        let total_ms: u128 = samples.iter().map(|d| d.as_millis()).sum();
        let mean_ms = total_ms / samples.len() as u128;
        let allowed_ms = mean_ms.saturating_mul(u128::from(self.percentage)) / 100;
        let allowed_ms = u64::try_from(allowed_ms).unwrap_or(u64::MAX);

        Ok(Duration::from_millis(allowed_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::mock::MockJob;
    use crate::jobs::{CompletedRun, RunOutcome};

    fn run(minutes: u64, outcome: RunOutcome) -> CompletedRun {
        CompletedRun::new(Duration::from_secs(minutes * 60), outcome)
    }

    #[test]
    fn test_mean_times_percentage() {
        let mut job = MockJob::new("build-1");
        job.history = vec![
            run(20, RunOutcome::Success),
            run(40, RunOutcome::Success),
        ];

        let s = ElasticStrategy::new(200, 3, Duration::from_secs(90 * 60));
        // mean 30m × 200% = 60m
        assert_eq!(s.compute(&job).unwrap(), Duration::from_secs(60 * 60));
    }

    #[test]
    fn test_failed_and_aborted_runs_skipped() {
        let mut job = MockJob::new("build-1");
        job.history = vec![
            run(500, RunOutcome::Failed),
            run(10, RunOutcome::Success),
            run(999, RunOutcome::Aborted),
            run(30, RunOutcome::Unstable),
        ];

        let s = ElasticStrategy::new(100, 5, Duration::from_secs(90 * 60));
        // mean of 10m and 30m = 20m
        assert_eq!(s.compute(&job).unwrap(), Duration::from_secs(20 * 60));
    }

    #[test]
    fn test_newest_first_window() {
        let mut job = MockJob::new("build-1");
        // Newest first: the 60m run falls outside a 2-sample window.
        job.history = vec![
            run(10, RunOutcome::Success),
            run(20, RunOutcome::Success),
            run(60, RunOutcome::Success),
        ];

        let s = ElasticStrategy::new(100, 2, Duration::from_secs(90 * 60));
        assert_eq!(s.compute(&job).unwrap(), Duration::from_secs(15 * 60));
    }

    #[test]
    fn test_no_qualifying_history_uses_fallback() {
        let mut job = MockJob::new("build-1");
        job.history = vec![run(45, RunOutcome::Failed)];

        let s = ElasticStrategy::new(200, 3, Duration::from_secs(90 * 60));
        assert_eq!(s.compute(&job).unwrap(), Duration::from_secs(90 * 60));
    }

    #[test]
    fn test_average_below_fallback_is_kept() {
        let mut job = MockJob::new("build-1");
        job.history = vec![run(2, RunOutcome::Success)];

        let s = ElasticStrategy::new(100, 3, Duration::from_secs(90 * 60));
        assert_eq!(s.compute(&job).unwrap(), Duration::from_secs(2 * 60));
    }
}
