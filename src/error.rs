//! Error types used by the timeout supervision engine.
//!
//! This module defines three error enums:
//!
//! - [`StrategyError`] — failures while computing a timeout budget.
//! - [`OperationError`] — failures inside a remediation operation.
//! - [`JobError`] — failures reported by the host's job collaborator.
//!
//! All types provide `as_label` for stable snake_case identifiers in
//! logs/metrics, mirroring the conventions of the event subscribers.

use thiserror::Error;

/// # Errors produced while evaluating a timeout strategy.
///
/// A strategy failure is a **configuration** problem, never a reason to pick
/// an arbitrary timeout: the supervisor reacts by arming nothing at all and
/// publishing a `StrategyFailed` event (fail open).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StrategyError {
    /// Deadline text did not parse as `H:MM[:SS]` (after macro expansion).
    #[error("invalid deadline time {text:?}: {reason}")]
    InvalidDeadline {
        /// The expanded text that failed to parse.
        text: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The host failed to expand environment macros in a configured value.
    #[error("macro expansion failed: {error}")]
    Expansion {
        /// The underlying host error message.
        error: String,
    },
}

impl StrategyError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            StrategyError::InvalidDeadline { .. } => "strategy_invalid_deadline",
            StrategyError::Expansion { .. } => "strategy_expansion_failed",
        }
    }
}

/// # Errors produced by remediation operations.
///
/// Any `Err` halts the remainder of the operation chain for that firing.
/// The halt is published to the bus and absorbed there; it never escapes
/// into the scheduler task.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum OperationError {
    /// Interrupting the job failed on the host side.
    #[error("interrupt failed: {error}")]
    Interrupt {
        /// The underlying host error message.
        error: String,
    },

    /// Scheduling a restart failed on the host side.
    #[error("restart failed: {error}")]
    Restart {
        /// The underlying host error message.
        error: String,
    },

    /// An externally supplied build step failed.
    #[error("sub-step failed: {error}")]
    Step {
        /// The step's own error message.
        error: String,
    },

    /// A build step requested a capability the degraded context rejects.
    #[error("launching is not available during timeout remediation")]
    LaunchRejected,
}

impl OperationError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            OperationError::Interrupt { .. } => "operation_interrupt_failed",
            OperationError::Restart { .. } => "operation_restart_failed",
            OperationError::Step { .. } => "operation_step_failed",
            OperationError::LaunchRejected => "operation_launch_rejected",
        }
    }
}

impl From<JobError> for OperationError {
    fn from(e: JobError) -> Self {
        OperationError::Interrupt {
            error: e.to_string(),
        }
    }
}

/// # Error reported by the host's job collaborator.
///
/// The engine treats the job model as an external system; failures carry a
/// host-provided message and nothing more.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct JobError {
    /// Host-provided failure message.
    pub message: String,
}

impl JobError {
    /// Creates a job error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
