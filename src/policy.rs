//! # Timeout policy: strategy + remediation bundle for one job.
//!
//! Defines [`TimeoutPolicy`], the configuration bundle the host hands to the
//! supervisor when a job starts: which strategy computes the budget, which
//! operations fire on deadline, and optionally which environment variable
//! receives the computed timeout.
//!
//! A policy can be created:
//! - **From config** with [`TimeoutPolicy::new`] (built-in strategy variants)
//! - **With a custom strategy** via [`TimeoutPolicy::with_strategy`]

use std::sync::Arc;

use crate::operations::OperationConfig;
use crate::strategies::{Strategy, StrategyConfig};

/// Per-job (or global) supervision policy.
///
/// Bundles together:
/// - The timeout strategy ([`Strategy`])
/// - The ordered remediation operations ([`OperationConfig`]; empty ⇒
///   implicit abort)
/// - An optional environment variable name that receives the computed
///   timeout, in milliseconds, at arm time
///
/// ## Example
/// ```rust
/// use jobvisor::{OperationConfig, StrategyConfig, TimeoutPolicy};
///
/// let policy = TimeoutPolicy::new(
///     &StrategyConfig::Absolute { minutes: 30 },
///     vec![
///         OperationConfig::WriteDescription {
///             template: "aborted after {0} minutes".into(),
///         },
///         OperationConfig::Abort,
///     ],
/// )
/// .with_timeout_env("BUILD_TIMEOUT_MS");
///
/// assert_eq!(policy.operations().len(), 2);
/// assert_eq!(policy.timeout_env(), Some("BUILD_TIMEOUT_MS"));
/// ```
#[derive(Clone)]
pub struct TimeoutPolicy {
    strategy: Arc<dyn Strategy>,
    operations: Vec<OperationConfig>,
    timeout_env: Option<String>,
}

impl TimeoutPolicy {
    /// Creates a policy from a built-in strategy variant.
    pub fn new(strategy: &StrategyConfig, operations: Vec<OperationConfig>) -> Self {
        Self::with_strategy(strategy.build(), operations)
    }

    /// Creates a policy around a custom strategy implementation.
    pub fn with_strategy(strategy: Arc<dyn Strategy>, operations: Vec<OperationConfig>) -> Self {
        Self {
            strategy,
            operations,
            timeout_env: None,
        }
    }

    /// Publishes the computed timeout (milliseconds) into the job environment
    /// under `name` at arm time.
    pub fn with_timeout_env(mut self, name: impl Into<String>) -> Self {
        self.timeout_env = Some(name.into());
        self
    }

    /// Returns the strategy.
    pub fn strategy(&self) -> &Arc<dyn Strategy> {
        &self.strategy
    }

    /// Returns the configured operation list (possibly empty).
    pub fn operations(&self) -> &[OperationConfig] {
        &self.operations
    }

    /// Returns the environment variable name for the computed timeout.
    pub fn timeout_env(&self) -> Option<&str> {
        self.timeout_env.as_deref()
    }
}
