//! # Runtime events emitted by the supervisor, scheduler, and operation chain.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Timer events**: arm/fire/cancel/reset lifecycle of per-job timers
//! - **Remediation events**: operation chain progress and halts
//! - **Diagnostic events**: strategy failures, duplicate arms, drained timers
//! - **Subscriber events**: fan-out overflow and panic isolation
//!
//! The [`Event`] struct carries metadata such as timestamps, job ids,
//! operation names, armed durations, and error text.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Timer lifecycle events ===
    /// A deadline timer was armed for a job.
    ///
    /// Sets: `job`, `timeout` (floor-clamped armed duration), `at`, `seq`.
    TimerArmed,

    /// A job's timer reached its deadline and remediation is about to run.
    ///
    /// Sets: `job`, `timeout`, `at`, `seq`.
    TimerFired,

    /// A job completed before its deadline; the timer was cancelled.
    ///
    /// Sets: `job`, `at`, `seq`.
    TimerCancelled,

    /// A no-activity timer was re-armed because the job produced output.
    ///
    /// Sets: `job`, `timeout` (fresh quiet period), `at`, `seq`.
    TimerReset,

    /// An arm was requested for a job that already holds an armed timer.
    ///
    /// The new timer is discarded; existing supervision is untouched.
    /// Sets: `job`, `at`, `seq`.
    DuplicateArm,

    // === Strategy / diagnostic events ===
    /// Strategy evaluation failed; the job proceeds **unsupervised**.
    ///
    /// Sets: `job`, `error`, `at`, `seq`.
    StrategyFailed,

    /// The shared scheduler was drained at shutdown.
    ///
    /// Sets: `outstanding` (pending fires discarded), `at`, `seq`.
    SchedulerDrained,

    // === Remediation events ===
    /// An operation stopped the chain: it returned "stop", errored, or
    /// panicked. Remaining operations do not run.
    ///
    /// Sets: `job`, `operation`, `timeout`, `error` (absent for a plain
    /// "stop" return), `at`, `seq`.
    OperationHalted,

    /// An operation hit a recoverable problem and continued (e.g. a
    /// description macro failed to expand).
    ///
    /// Sets: `job`, `operation`, `error`, `at`, `seq`.
    OperationWarning,

    /// Every configured operation ran to completion for this firing.
    ///
    /// Sets: `job`, `timeout`, `at`, `seq`.
    ChainCompleted,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets: `job` (subscriber name), `error` (panic info), `at`, `seq`.
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `job` (subscriber name), `error` (reason), `at`, `seq`.
    SubscriberOverflow,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Job id (or subscriber name for subscriber events).
    pub job: Option<Arc<str>>,
    /// Remediation operation name, if applicable.
    pub operation: Option<Arc<str>>,
    /// Armed/allowed duration, if applicable.
    pub timeout: Option<Duration>,
    /// Human-readable error or reason text.
    pub error: Option<Arc<str>>,
    /// Count of pending timers discarded at shutdown.
    pub outstanding: Option<u64>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            job: None,
            operation: None,
            timeout: None,
            error: None,
            outstanding: None,
        }
    }

    /// Attaches a job id (or subscriber name).
    #[inline]
    pub fn with_job(mut self, job: impl Into<Arc<str>>) -> Self {
        self.job = Some(job.into());
        self
    }

    /// Attaches an operation name.
    #[inline]
    pub fn with_operation(mut self, operation: impl Into<Arc<str>>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attaches an armed/allowed duration.
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        self.timeout = Some(d);
        self
    }

    /// Attaches a human-readable error or reason.
    #[inline]
    pub fn with_error(mut self, error: impl Into<Arc<str>>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attaches the outstanding-timer count.
    #[inline]
    pub fn with_outstanding(mut self, n: u64) -> Self {
        self.outstanding = Some(n);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::now(EventKind::SubscriberOverflow)
            .with_job(subscriber)
            .with_error(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::now(EventKind::SubscriberPanicked)
            .with_job(subscriber)
            .with_error(info)
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}
