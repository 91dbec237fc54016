//! Remediation operations and the short-circuiting chain.
//!
//! ## Contents
//! - [`Operation`] the remediation step trait, [`OperationContext`]
//! - [`OperationChain`] ordered, short-circuiting executor
//! - [`OperationConfig`] ordered list element for policies
//! - Built-ins: [`AbortOperation`], [`FailOperation`],
//!   [`WriteDescriptionOperation`], [`AbortAndRestartOperation`],
//!   [`RunSubStepOperation`] (+ [`BuildStep`], [`StepContext`])
//!
//! ## Quick wiring
//! ```text
//! TimeoutPolicy { operations: Vec<OperationConfig>, .. }
//!      └─► OperationChain::from_config (empty ⇒ implicit abort)
//!           └─► chain.run(job, armed_duration, bus) on timer fire
//! ```

mod abort;
mod abort_restart;
mod chain;
mod describe;
mod fail;
mod operation;
mod sub_step;

use std::sync::Arc;

pub use abort::AbortOperation;
pub use abort_restart::AbortAndRestartOperation;
pub use chain::OperationChain;
pub use describe::WriteDescriptionOperation;
pub use fail::FailOperation;
pub use operation::{Operation, OperationContext};
pub use sub_step::{BuildStep, RunSubStepOperation, StepContext};

/// One entry in a policy's ordered operation list.
///
/// Each built-in is independently configurable and composable; custom
/// operations enter through [`OperationConfig::Custom`].
#[derive(Clone)]
pub enum OperationConfig {
    /// Interrupt with an aborted status.
    Abort,
    /// Interrupt with a failed status and record the timed-out marker.
    Fail,
    /// Overwrite the job description from a template (`{0}` = elapsed minutes).
    WriteDescription {
        /// Template text; environment macros are expanded by the host.
        template: String,
    },
    /// Interrupt with aborted, then restart when the host offers a facility.
    AbortAndRestart {
        /// Maximum number of timeout-driven restarts.
        max_restarts: u32,
    },
    /// Run an externally supplied build step in a degraded context.
    RunSubStep {
        /// The step to execute.
        step: Arc<dyn BuildStep>,
        /// Continue the chain regardless of the step's outcome.
        continue_on_failure: bool,
    },
    /// A user-supplied operation.
    Custom(Arc<dyn Operation>),
}

impl OperationConfig {
    /// Builds the configured operation.
    pub fn build(&self) -> Arc<dyn Operation> {
        match self {
            OperationConfig::Abort => Arc::new(AbortOperation::new()),
            OperationConfig::Fail => Arc::new(FailOperation::new()),
            OperationConfig::WriteDescription { template } => {
                Arc::new(WriteDescriptionOperation::new(template.clone()))
            }
            OperationConfig::AbortAndRestart { max_restarts } => {
                Arc::new(AbortAndRestartOperation::new(*max_restarts))
            }
            OperationConfig::RunSubStep {
                step,
                continue_on_failure,
            } => Arc::new(RunSubStepOperation::new(
                Arc::clone(step),
                *continue_on_failure,
            )),
            OperationConfig::Custom(op) => Arc::clone(op),
        }
    }
}
