//! # Core remediation operation trait
//!
//! `Operation` is the extension point for remediation steps executed when a
//! job's deadline fires. Operations run sequentially on the scheduler task as
//! an [`OperationChain`](crate::operations::OperationChain); each one decides
//! whether the chain continues.
//!
//! ## Contract
//! - `Ok(true)` — continue to the next operation.
//! - `Ok(false)` — stop the chain; remaining operations do not run.
//! - `Err(_)` or a panic — stop the chain; the halt is published to the bus
//!   and absorbed there.
//! - Operations may do async I/O (interrupting, writing descriptions); they
//!   never run on the job's own execution context.
//! - Operations hold no cross-job mutable state.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::OperationError;
use crate::events::Bus;
use crate::jobs::Job;

/// Everything an operation sees for one firing.
pub struct OperationContext<'a> {
    /// The job whose deadline fired.
    pub job: &'a dyn Job,
    /// The armed (allowed) duration that was exceeded.
    pub timeout: Duration,
    /// Bus for recoverable-problem diagnostics ([`EventKind::OperationWarning`]).
    ///
    /// [`EventKind::OperationWarning`]: crate::EventKind::OperationWarning
    pub bus: &'a Bus,
}

/// Contract for a single remediation step.
#[async_trait]
pub trait Operation: Send + Sync + 'static {
    /// Human-readable kind (for logs/diagnostics).
    fn name(&self) -> &'static str;

    /// Performs the remediation action.
    ///
    /// Returns whether subsequent operations in the chain should run.
    async fn perform(&self, ctx: &OperationContext<'_>) -> Result<bool, OperationError>;
}
