//! # Abort-and-restart operation.
//!
//! Interrupts the job with "aborted", then schedules an immediate restart if
//! the host offers a restart facility and the job has not exhausted the
//! configured restart budget. The facility check is a capability probe, not a
//! hard dependency: hosts without one simply get the abort.

use async_trait::async_trait;

use crate::error::OperationError;
use crate::jobs::TerminalStatus;
use crate::operations::{Operation, OperationContext};

/// Interrupts with aborted, then restarts when possible. Always continues.
#[derive(Clone, Copy, Debug)]
pub struct AbortAndRestartOperation {
    /// Maximum number of timeout-driven restarts for one job.
    pub max_restarts: u32,
}

impl AbortAndRestartOperation {
    /// Creates an abort-and-restart operation.
    pub fn new(max_restarts: u32) -> Self {
        Self { max_restarts }
    }
}

#[async_trait]
impl Operation for AbortAndRestartOperation {
    fn name(&self) -> &'static str {
        "abort_and_restart"
    }

    async fn perform(&self, ctx: &OperationContext<'_>) -> Result<bool, OperationError> {
        ctx.job
            .interrupt(TerminalStatus::Aborted)
            .await
            .map_err(|e| OperationError::Interrupt {
                error: e.to_string(),
            })?;

        if ctx.job.supports_restart() && ctx.job.restart_count() < self.max_restarts {
            ctx.job
                .schedule_restart()
                .await
                .map_err(|e| OperationError::Restart {
                    error: e.to_string(),
                })?;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Bus;
    use crate::jobs::mock::MockJob;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn ctx<'a>(job: &'a MockJob, bus: &'a Bus) -> OperationContext<'a> {
        OperationContext {
            job,
            timeout: Duration::from_secs(60),
            bus,
        }
    }

    #[tokio::test]
    async fn test_restarts_when_capable_and_under_cap() {
        let mut job = MockJob::new("build-1");
        job.supports_restart = true;
        job.restart_count = 1;
        let bus = Bus::new(16);

        let op = AbortAndRestartOperation::new(3);
        assert!(op.perform(&ctx(&job, &bus)).await.unwrap());
        assert_eq!(job.interrupted_with(), vec![TerminalStatus::Aborted]);
        assert_eq!(job.restarts_scheduled.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cap_reached_aborts_only() {
        let mut job = MockJob::new("build-1");
        job.supports_restart = true;
        job.restart_count = 3;
        let bus = Bus::new(16);

        let op = AbortAndRestartOperation::new(3);
        assert!(op.perform(&ctx(&job, &bus)).await.unwrap());
        assert_eq!(job.restarts_scheduled.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_facility_aborts_only() {
        let job = MockJob::new("build-1");
        let bus = Bus::new(16);

        let op = AbortAndRestartOperation::new(3);
        assert!(op.perform(&ctx(&job, &bus)).await.unwrap());
        assert_eq!(job.interrupted_with(), vec![TerminalStatus::Aborted]);
        assert_eq!(job.restarts_scheduled.load(Ordering::SeqCst), 0);
    }
}
