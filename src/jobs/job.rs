//! # Job abstraction: the host-side collaborator under supervision.
//!
//! The engine never runs a job itself. The host implements [`Job`] over its
//! own build/execution model and the supervisor only queries state and issues
//! commands through this trait.
//!
//! ## Contract
//! - Queries (`elapsed`, `estimated_remaining`, `history`, ...) are cheap and
//!   non-blocking; the host synchronizes its own history store.
//! - Commands (`interrupt`, `set_description`, ...) may do I/O; they run on
//!   the shared scheduler task during remediation, never on the job's own
//!   execution context.
//! - [`Job::history`] returns completed runs **newest first**; the elastic
//!   strategy walks it strictly backward from the current run.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::JobError;

/// Opaque, stable identifier for a running job instance.
///
/// Unique while the job is active; used as the registry key. Cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JobId(Arc<str>);

impl JobId {
    /// Creates a job id from any string-like value.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Terminal status requested when interrupting a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalStatus {
    /// The job is stopped and marked aborted.
    Aborted,
    /// The job is stopped and marked failed.
    Failed,
}

/// Outcome of a prior completed run, as recorded by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Completed successfully.
    Success,
    /// Completed with warnings (unstable), still a representative sample.
    Unstable,
    /// Failed; not representative of a healthy run duration.
    Failed,
    /// Externally aborted; not representative of a healthy run duration.
    Aborted,
}

impl RunOutcome {
    /// Whether a run with this outcome qualifies as a duration sample.
    ///
    /// Samples must be no worse than unstable; failed and aborted runs are
    /// skipped when averaging.
    pub fn qualifies_as_sample(&self) -> bool {
        matches!(self, RunOutcome::Success | RunOutcome::Unstable)
    }
}

/// One completed prior run of the same job definition.
#[derive(Clone, Copy, Debug)]
pub struct CompletedRun {
    /// How long the run took.
    pub duration: Duration,
    /// How the run ended.
    pub outcome: RunOutcome,
}

impl CompletedRun {
    /// Convenience constructor.
    pub fn new(duration: Duration, outcome: RunOutcome) -> Self {
        Self { duration, outcome }
    }
}

/// # Host-side job under supervision.
///
/// Implementations wrap the host's running job entity. All commands are
/// idempotent from the engine's point of view: the engine may issue them
/// after the job has already finished and expects the host to no-op.
#[async_trait]
pub trait Job: Send + Sync + 'static {
    /// Stable identifier for this job instance.
    fn id(&self) -> &JobId;

    /// Wall-clock time this job has been running.
    fn elapsed(&self) -> Duration;

    /// Host's estimate of remaining run time, when one exists.
    fn estimated_remaining(&self) -> Option<Duration> {
        None
    }

    /// Prior completed runs of the same job definition, **newest first**.
    fn history(&self) -> Vec<CompletedRun> {
        Vec::new()
    }

    /// How many times this job has already been restarted by remediation.
    fn restart_count(&self) -> u32 {
        0
    }

    /// Capability probe: whether the host offers a restart facility.
    fn supports_restart(&self) -> bool {
        false
    }

    /// Expands host environment macros in `template`.
    fn expand(&self, template: &str) -> Result<String, JobError> {
        Ok(template.to_string())
    }

    /// Requests interruption of the running job with a terminal status.
    async fn interrupt(&self, status: TerminalStatus) -> Result<(), JobError>;

    /// Attaches the persisted timed-out marker to the job.
    ///
    /// First writer wins: returns `true` if this call recorded the marker,
    /// `false` if one was already present (no-op).
    async fn mark_timed_out(&self, reason: &str) -> Result<bool, JobError>;

    /// Sets (overwriting) the job's human-readable description.
    async fn set_description(&self, text: &str) -> Result<(), JobError>;

    /// Publishes a value into the job's environment.
    async fn publish_env(&self, name: &str, value: &str) -> Result<(), JobError>;

    /// Schedules an immediate restart of the job.
    ///
    /// Only called after [`Job::supports_restart`] returned `true`.
    async fn schedule_restart(&self) -> Result<(), JobError> {
        Err(JobError::new("restart facility not available"))
    }
}
