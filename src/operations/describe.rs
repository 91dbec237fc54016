//! # Write-description operation: annotate the job with a timeout notice.
//!
//! Substitutes the `{0}` placeholder with the job's elapsed whole minutes,
//! expands host environment macros, and overwrites the job description with
//! the result. Expansion or write failures are published as
//! `OperationWarning` and never stop the chain.

use async_trait::async_trait;

use crate::error::OperationError;
use crate::events::{Event, EventKind};
use crate::jobs::Job;
use crate::operations::{Operation, OperationContext};

/// Overwrites the job description from a text template. Always continues.
#[derive(Clone, Debug)]
pub struct WriteDescriptionOperation {
    /// Template text; `{0}` is bound to elapsed minutes, environment macros
    /// are expanded by the host.
    pub template: String,
}

impl WriteDescriptionOperation {
    /// Creates a write-description operation.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    fn render(&self, job: &dyn Job) -> Result<String, String> {
        let minutes = job.elapsed().as_secs() / 60;
        let text = self.template.replace("{0}", &minutes.to_string());
        job.expand(&text).map_err(|e| e.to_string())
    }
}

#[async_trait]
impl Operation for WriteDescriptionOperation {
    fn name(&self) -> &'static str {
        "write_description"
    }

    async fn perform(&self, ctx: &OperationContext<'_>) -> Result<bool, OperationError> {
        let warn = |error: String| {
            ctx.bus.publish(
                Event::now(EventKind::OperationWarning)
                    .with_job(ctx.job.id().as_str())
                    .with_operation(self.name())
                    .with_error(error),
            );
        };

        match self.render(ctx.job) {
            Ok(text) => {
                if let Err(e) = ctx.job.set_description(&text).await {
                    warn(e.to_string());
                }
            }
            Err(e) => warn(e),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Bus;
    use crate::jobs::mock::MockJob;
    use std::time::Duration;

    #[tokio::test]
    async fn test_substitutes_elapsed_minutes_and_macros() {
        let mut job = MockJob::new("build-1");
        job.elapsed = Duration::from_secs(45 * 60 + 30);
        let bus = Bus::new(16);
        let ctx = OperationContext {
            job: &job,
            timeout: Duration::from_secs(3600),
            bus: &bus,
        };

        let op = WriteDescriptionOperation::new("${JOB} aborted after {0} minutes");
        assert!(op.perform(&ctx).await.unwrap());
        assert_eq!(
            job.description.lock().unwrap().as_deref(),
            Some("build-1 aborted after 45 minutes")
        );
    }

    #[tokio::test]
    async fn test_expansion_failure_warns_and_continues() {
        let mut job = MockJob::new("build-1");
        job.fail_expand = true;
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let ctx = OperationContext {
            job: &job,
            timeout: Duration::from_secs(3600),
            bus: &bus,
        };

        let op = WriteDescriptionOperation::new("${MISSING}");
        assert!(op.perform(&ctx).await.unwrap());
        assert!(job.description.lock().unwrap().is_none());

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::OperationWarning);
        assert_eq!(ev.operation.as_deref(), Some("write_description"));
    }
}
