//! # Run-sub-step operation: execute an externally supplied build step.
//!
//! The step runs in a **degraded** execution context: the job is already
//! being torn down, so anything that needs a live process/channel launcher is
//! rejected. The operation's continue/stop result is the step's own outcome,
//! unless `continue_on_failure` forces the chain onward regardless.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::OperationError;
use crate::jobs::Job;
use crate::operations::{Operation, OperationContext};

/// Execution context handed to a [`BuildStep`] during remediation.
///
/// Timeout remediation always runs degraded: [`StepContext::require_launcher`]
/// fails, because the job's executor is past the point where new processes or
/// channels may be launched.
#[derive(Clone, Copy, Debug)]
pub struct StepContext {
    launch_allowed: bool,
}

impl StepContext {
    /// Context that rejects any launch request.
    pub fn degraded() -> Self {
        Self {
            launch_allowed: false,
        }
    }

    /// Whether launching processes/channels is permitted.
    pub fn launch_allowed(&self) -> bool {
        self.launch_allowed
    }

    /// Fails unless this context permits launching.
    pub fn require_launcher(&self) -> Result<(), OperationError> {
        if self.launch_allowed {
            Ok(())
        } else {
            Err(OperationError::LaunchRejected)
        }
    }
}

/// Externally supplied build step, runnable during remediation.
#[async_trait]
pub trait BuildStep: Send + Sync + 'static {
    /// Human-readable step name (for logs/diagnostics).
    fn name(&self) -> &'static str;

    /// Runs the step against the timed-out job.
    ///
    /// Returns the step's own success (`true`) or soft failure (`false`).
    async fn run(&self, job: &dyn Job, ctx: &StepContext) -> Result<bool, OperationError>;
}

/// Runs a [`BuildStep`] in a degraded context.
#[derive(Clone)]
pub struct RunSubStepOperation {
    /// The step to execute.
    pub step: Arc<dyn BuildStep>,
    /// When set, the chain continues regardless of the step's outcome.
    pub continue_on_failure: bool,
}

impl RunSubStepOperation {
    /// Creates a run-sub-step operation.
    pub fn new(step: Arc<dyn BuildStep>, continue_on_failure: bool) -> Self {
        Self {
            step,
            continue_on_failure,
        }
    }
}

#[async_trait]
impl Operation for RunSubStepOperation {
    fn name(&self) -> &'static str {
        "run_sub_step"
    }

    async fn perform(&self, ctx: &OperationContext<'_>) -> Result<bool, OperationError> {
        let res = self.step.run(ctx.job, &StepContext::degraded()).await;
        if self.continue_on_failure {
            return Ok(true);
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Bus;
    use crate::jobs::mock::MockJob;
    use std::time::Duration;

    struct CleanupStep {
        ok: bool,
    }

    #[async_trait]
    impl BuildStep for CleanupStep {
        fn name(&self) -> &'static str {
            "cleanup"
        }

        async fn run(&self, _job: &dyn Job, _ctx: &StepContext) -> Result<bool, OperationError> {
            Ok(self.ok)
        }
    }

    struct LaunchingStep;

    #[async_trait]
    impl BuildStep for LaunchingStep {
        fn name(&self) -> &'static str {
            "launcher"
        }

        async fn run(&self, _job: &dyn Job, ctx: &StepContext) -> Result<bool, OperationError> {
            ctx.require_launcher()?;
            Ok(true)
        }
    }

    fn ctx<'a>(job: &'a MockJob, bus: &'a Bus) -> OperationContext<'a> {
        OperationContext {
            job,
            timeout: Duration::from_secs(60),
            bus,
        }
    }

    #[tokio::test]
    async fn test_step_outcome_propagates() {
        let job = MockJob::new("build-1");
        let bus = Bus::new(16);

        let ok = RunSubStepOperation::new(Arc::new(CleanupStep { ok: true }), false);
        assert!(ok.perform(&ctx(&job, &bus)).await.unwrap());

        let soft_fail = RunSubStepOperation::new(Arc::new(CleanupStep { ok: false }), false);
        assert!(!soft_fail.perform(&ctx(&job, &bus)).await.unwrap());
    }

    #[tokio::test]
    async fn test_continue_on_failure_overrides() {
        let job = MockJob::new("build-1");
        let bus = Bus::new(16);

        let op = RunSubStepOperation::new(Arc::new(CleanupStep { ok: false }), true);
        assert!(op.perform(&ctx(&job, &bus)).await.unwrap());
    }

    #[tokio::test]
    async fn test_degraded_context_rejects_launching() {
        let job = MockJob::new("build-1");
        let bus = Bus::new(16);

        let op = RunSubStepOperation::new(Arc::new(LaunchingStep), false);
        assert!(matches!(
            op.perform(&ctx(&job, &bus)).await,
            Err(OperationError::LaunchRejected)
        ));
    }
}
