//! Job model: the contract between the engine and the host.
//!
//! ## Contents
//! - [`Job`] host collaborator trait (queries + commands)
//! - [`JobId`] opaque registry key
//! - [`CompletedRun`], [`RunOutcome`] history samples for the elastic strategy
//! - [`TerminalStatus`] requested interruption status
//! - [`TimeoutNote`] first-writer-wins annotation cell for host implementations

mod job;
mod note;

#[cfg(test)]
pub(crate) mod mock;

pub use job::{CompletedRun, Job, JobId, RunOutcome, TerminalStatus};
pub use note::TimeoutNote;
