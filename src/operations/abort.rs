//! # Abort operation: interrupt the job with an "aborted" status.

use async_trait::async_trait;

use crate::error::OperationError;
use crate::jobs::TerminalStatus;
use crate::operations::{Operation, OperationContext};

/// Interrupts the job with [`TerminalStatus::Aborted`]. Always continues.
///
/// This is also the implicit operation applied when a policy configures an
/// empty operation list.
#[derive(Clone, Copy, Debug, Default)]
pub struct AbortOperation;

impl AbortOperation {
    /// Creates an abort operation.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Operation for AbortOperation {
    fn name(&self) -> &'static str {
        "abort"
    }

    async fn perform(&self, ctx: &OperationContext<'_>) -> Result<bool, OperationError> {
        ctx.job
            .interrupt(TerminalStatus::Aborted)
            .await
            .map_err(|e| OperationError::Interrupt {
                error: e.to_string(),
            })?;
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
    async fn test_interrupts_with_aborted() {
        let job = MockJob::new("build-1");
        let bus = Bus::new(16);
        let ctx = OperationContext {
            job: &job,
            timeout: Duration::from_secs(60),
            bus: &bus,
        };

        let cont = AbortOperation::new().perform(&ctx).await.unwrap();
        assert!(cont);
        assert_eq!(job.interrupted_with(), vec![TerminalStatus::Aborted]);
    }
}
