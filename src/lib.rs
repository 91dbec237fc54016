//! # jobvisor
//!
//! **Jobvisor** is a timeout supervision engine for automation servers.
//!
//! It watches long-running jobs and terminates any job that exceeds its
//! allowed execution budget, applying a configurable, ordered chain of
//! remediation operations exactly once per timeout event. The crate is a
//! building block: the host owns job execution; jobvisor owns the deadline.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │TimeoutPolicy │   │TimeoutPolicy │   │TimeoutPolicy │
//!     │   (job #1)   │   │   (job #2)   │   │   (job #3)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Supervisor (arm / cancel / activity-reset)                       │
//! │  - Strategy (computes the allowed duration per job)               │
//! │  - TimerRegistry (job id → armed timer, insert-if-absent)         │
//! │  - Scheduler (shared delayed fires, CAS Armed→{Fired,Cancelled})  │
//! │  - Bus (broadcast events)  - SubscriberSet (fan-out)              │
//! └──────┬──────────────────────────────┬─────────────────────────────┘
//!        │ deadline reached             │ job completed
//!        ▼                              ▼
//!   OperationChain::run            registry.remove + timer.cancel
//!   (abort / fail / describe /     (idempotent; losing the race to
//!    restart / sub-step, short-     the fire side is a defined no-op)
//!    circuiting, panic-isolated)
//! ```
//!
//! ### Lifecycle
//! ```text
//! job started ──► Supervisor::arm(job, policy)
//!   ├─► strategy.compute(job) ── Err ─► StrategyFailed, run unsupervised
//!   ├─► clamp to Config::floor
//!   ├─► Scheduler::schedule(timeout, fire)
//!   └─► TimerRegistry::insert (duplicate ⇒ discard + DuplicateArm)
//!
//! then exactly one of:
//!   - job completes ─► Supervisor::cancel ─► timer cancelled, entry removed
//!   - deadline hits ─► fire wins CAS ─► TimerFired ─► OperationChain::run
//!                                       └─► entry removed unconditionally
//!
//! no-activity policies: every output event ─► Supervisor::on_activity
//!   └─► cancel current timer, re-arm fresh quiet period (TimerReset)
//! ```
//!
//! ## Features
//! | Area            | Description                                                   | Key types / traits                       |
//! |-----------------|---------------------------------------------------------------|------------------------------------------|
//! | **Strategies**  | Compute the allowed run duration per job.                     | [`Strategy`], [`StrategyConfig`]         |
//! | **Operations**  | Remediation steps fired on deadline, short-circuiting chain.  | [`Operation`], [`OperationChain`]        |
//! | **Supervision** | Arm/cancel lifecycle, at-most-once firing, activity resets.   | [`Supervisor`], [`GlobalSupervisor`]     |
//! | **Job model**   | Host collaborator contract and history samples.               | [`Job`], [`JobId`], [`CompletedRun`]     |
//! | **Subscribers** | Hook into engine events (logging, metrics, custom sinks).     | [`Subscribe`], [`Event`], [`EventKind`]  |
//! | **Errors**      | Typed errors for strategies, operations, and the job model.   | [`StrategyError`], [`OperationError`]    |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use async_trait::async_trait;
//! use jobvisor::{
//!     Config, Job, JobError, JobId, OperationConfig, StrategyConfig, Supervisor,
//!     TerminalStatus, TimeoutPolicy,
//! };
//!
//! struct DemoJob {
//!     id: JobId,
//! }
//!
//! #[async_trait]
//! impl Job for DemoJob {
//!     fn id(&self) -> &JobId { &self.id }
//!     fn elapsed(&self) -> Duration { Duration::ZERO }
//!     async fn interrupt(&self, _status: TerminalStatus) -> Result<(), JobError> { Ok(()) }
//!     async fn mark_timed_out(&self, _reason: &str) -> Result<bool, JobError> { Ok(true) }
//!     async fn set_description(&self, _text: &str) -> Result<(), JobError> { Ok(()) }
//!     async fn publish_env(&self, _name: &str, _value: &str) -> Result<(), JobError> { Ok(()) }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sup = Supervisor::builder(Config::default()).build();
//!
//!     // 30 minutes, then abort (the implicit operation for an empty list).
//!     let policy = TimeoutPolicy::new(
//!         &StrategyConfig::Absolute { minutes: 30 },
//!         vec![OperationConfig::Abort],
//!     );
//!
//!     let job = Arc::new(DemoJob { id: JobId::new("build-42") });
//!     sup.arm(job.clone(), &policy).await;
//!     assert!(sup.is_armed(job.id()).await);
//!
//!     // The job finished first: cancel wins, remediation never runs.
//!     sup.cancel(job.id()).await;
//!     assert!(!sup.is_armed(job.id()).await);
//!
//!     sup.shutdown().await;
//! }
//! ```

mod core;
mod error;
mod events;
mod jobs;
mod operations;
mod policy;
mod strategies;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{
    Config, GlobalSupervisor, ScheduledTimer, Scheduler, Supervisor, SupervisorBuilder,
    TimerRegistry, DEFAULT_FLOOR,
};
pub use error::{JobError, OperationError, StrategyError};
pub use events::{Bus, Event, EventKind};
pub use jobs::{CompletedRun, Job, JobId, RunOutcome, TerminalStatus, TimeoutNote};
pub use operations::{
    AbortAndRestartOperation, AbortOperation, BuildStep, FailOperation, Operation, OperationChain,
    OperationConfig, OperationContext, RunSubStepOperation, StepContext,
    WriteDescriptionOperation,
};
pub use policy::TimeoutPolicy;
pub use strategies::{
    AbsoluteStrategy, DeadlineStrategy, ElasticStrategy, LikelyStuckStrategy, NoActivityStrategy,
    Strategy, StrategyConfig,
};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
