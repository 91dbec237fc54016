//! # Core strategy trait
//!
//! `Strategy` is the extension point for plugging custom timeout policies
//! into the engine. A strategy is a pure function of job state: it may read
//! elapsed time, history, or the wall clock, but holds no cross-job mutable
//! state and performs no side effects.
//!
//! ## Contract
//! - `compute` returns the **raw** allowed duration; the supervisor applies
//!   the configured floor clamp at arm time, never the strategy.
//! - On `Err`, the caller arms **no timer at all** (the job runs unbounded)
//!   and publishes a `StrategyFailed` diagnostic. A failing strategy must
//!   never silently fall back to an arbitrary value.
//! - Strategies whose deadline re-arms on job output override
//!   [`Strategy::resets_on_activity`].

use std::time::Duration;

use crate::error::StrategyError;
use crate::jobs::Job;

/// Contract for timeout budget strategies.
///
/// Implementations are cheap, synchronous, and side-effect free; they run on
/// the arming path, which must stay non-blocking.
pub trait Strategy: Send + Sync + 'static {
    /// Human-readable name (for logs/diagnostics).
    fn name(&self) -> &'static str;

    /// Computes the allowed run duration for `job`.
    ///
    /// Returns the raw duration; floor clamping happens at arm time.
    fn compute(&self, job: &dyn Job) -> Result<Duration, StrategyError>;

    /// Whether the armed deadline should be re-armed on every output event
    /// from the job, rather than being computed once.
    fn resets_on_activity(&self) -> bool {
        false
    }
}
