//! Timeout budget strategies.
//!
//! This module groups the knobs that control **how long** a job may run
//! before remediation fires.
//!
//! ## Contents
//! - [`Strategy`] the pluggable policy trait
//! - [`StrategyConfig`] closed tagged union of the built-in variants
//! - Built-ins: [`AbsoluteStrategy`], [`ElasticStrategy`],
//!   [`DeadlineStrategy`], [`NoActivityStrategy`], [`LikelyStuckStrategy`]
//!
//! ## Quick wiring
//! ```text
//! TimeoutPolicy { strategy, operations, timeout_env }
//!      └─► core::supervisor::Supervisor uses:
//!           - strategy.compute(job) to obtain the raw budget
//!           - Config::floor to clamp it before arming
//!           - strategy.resets_on_activity() to honor output-driven re-arms
//! ```
//!
//! Custom strategies enter through
//! [`TimeoutPolicy::with_strategy`](crate::TimeoutPolicy::with_strategy);
//! the config enum stays closed over the built-ins.

mod absolute;
mod deadline;
mod elastic;
mod likely_stuck;
mod no_activity;
mod strategy;

use std::sync::Arc;
use std::time::Duration;

pub use absolute::AbsoluteStrategy;
pub use deadline::DeadlineStrategy;
pub use elastic::ElasticStrategy;
pub use likely_stuck::LikelyStuckStrategy;
pub use no_activity::NoActivityStrategy;
pub use strategy::Strategy;

/// Configuration selecting one built-in strategy variant and its parameters.
///
/// Exactly one variant is active per policy. Plain structured data; how it is
/// persisted is the host's concern.
#[derive(Clone, Debug)]
pub enum StrategyConfig {
    /// Fixed number of minutes.
    Absolute {
        /// Allowed run time in minutes.
        minutes: u64,
    },
    /// Percentage of the mean of recent qualifying run durations.
    Elastic {
        /// Percentage of the historical mean (e.g. `200` = 2×).
        percentage: u32,
        /// Number of recent qualifying completions to average over.
        samples: usize,
        /// Budget when no qualifying history exists.
        fallback: Duration,
    },
    /// Wall-clock time-of-day deadline.
    Deadline {
        /// Time-of-day text, `H:MM[:SS]`; may contain environment macros.
        time: String,
        /// Window past the deadline that still fires immediately.
        tolerance: Duration,
    },
    /// Quiet-period watchdog, re-armed on every output event.
    NoActivity {
        /// Quiet period after which the job is considered silent.
        quiet: Duration,
    },
    /// Generous stuck-job detector (10× the estimated remaining time).
    LikelyStuck,
}

impl StrategyConfig {
    /// Builds the configured strategy.
    pub fn build(&self) -> Arc<dyn Strategy> {
        match self {
            StrategyConfig::Absolute { minutes } => Arc::new(AbsoluteStrategy::new(*minutes)),
            StrategyConfig::Elastic {
                percentage,
                samples,
                fallback,
            } => Arc::new(ElasticStrategy::new(*percentage, *samples, *fallback)),
            StrategyConfig::Deadline { time, tolerance } => {
                Arc::new(DeadlineStrategy::new(time.clone(), *tolerance))
            }
            StrategyConfig::NoActivity { quiet } => Arc::new(NoActivityStrategy::new(*quiet)),
            StrategyConfig::LikelyStuck => Arc::new(LikelyStuckStrategy::new()),
        }
    }
}
