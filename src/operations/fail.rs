//! # Fail operation: interrupt with a "failed" status and record the marker.

use async_trait::async_trait;

use crate::error::OperationError;
use crate::jobs::TerminalStatus;
use crate::operations::{Operation, OperationContext};

/// Interrupts the job with [`TerminalStatus::Failed`] and attaches the
/// persisted timed-out marker. Always continues.
///
/// The marker is first-writer-wins on the job side; if some earlier firing
/// already recorded one, this attempt is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailOperation;

impl FailOperation {
    /// Creates a fail operation.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Operation for FailOperation {
    fn name(&self) -> &'static str {
        "fail"
    }

    async fn perform(&self, ctx: &OperationContext<'_>) -> Result<bool, OperationError> {
        ctx.job
            .interrupt(TerminalStatus::Failed)
            .await
            .map_err(|e| OperationError::Interrupt {
                error: e.to_string(),
            })?;

        let reason = format!("timed out after the allowed {:?}", ctx.timeout);
        ctx.job
            .mark_timed_out(&reason)
            .await
            .map_err(|e| OperationError::Interrupt {
                error: e.to_string(),
            })?;
        Ok(true)
    }
}
