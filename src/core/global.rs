//! # Global supervisor: one server-wide policy for every job.
//!
//! A thin variant of [`Supervisor`] that applies [`Config::global`] uniformly
//! instead of taking a per-job policy. It shares the same registry and
//! scheduler contracts; the only difference is the configuration source —
//! and that it opts out entirely (no timer armed) when no global policy is
//! configured.

use std::sync::Arc;

use crate::core::config::Config;
use crate::core::supervisor::Supervisor;
use crate::jobs::{Job, JobId};

/// Applies the server-wide timeout policy from [`Config::global`].
#[derive(Clone)]
pub struct GlobalSupervisor {
    inner: Arc<Supervisor>,
}

impl GlobalSupervisor {
    /// Wraps a supervisor; the global policy comes from its configuration.
    pub fn new(inner: Arc<Supervisor>) -> Self {
        Self { inner }
    }

    /// Whether a global policy is configured at all.
    pub fn is_enabled(&self) -> bool {
        self.inner.cfg.global.is_some()
    }

    /// Arms the global policy for `job`, or does nothing when unconfigured.
    pub async fn arm(&self, job: Arc<dyn Job>) {
        if let Some(policy) = self.inner.cfg.global.clone() {
            self.inner.arm(job, &policy).await;
        }
    }

    /// Cancels the armed global timer for `id` (no-op when unarmed).
    pub async fn cancel(&self, id: &JobId) {
        self.inner.cancel(id).await;
    }

    /// Output-event hook; relevant when the global strategy resets on
    /// activity.
    pub async fn on_activity(&self, job: Arc<dyn Job>) {
        if let Some(policy) = self.inner.cfg.global.clone() {
            self.inner.on_activity(job, &policy).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::SupervisorBuilder;
    use crate::jobs::mock::MockJob;
    use crate::policy::TimeoutPolicy;
    use crate::strategies::StrategyConfig;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_opts_out_without_global_policy() {
        let sup = SupervisorBuilder::new(Config::default()).build();
        let global = GlobalSupervisor::new(Arc::clone(&sup));
        let job = Arc::new(MockJob::new("build-1"));

        assert!(!global.is_enabled());
        global.arm(job.clone()).await;
        assert!(!sup.is_armed(job.id()).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_applies_configured_global_policy() {
        let cfg = Config {
            floor: Duration::ZERO,
            global: Some(TimeoutPolicy::new(
                &StrategyConfig::Absolute { minutes: 15 },
                Vec::new(),
            )),
            ..Config::default()
        };
        let sup = SupervisorBuilder::new(cfg).build();
        let global = GlobalSupervisor::new(Arc::clone(&sup));
        let job = Arc::new(MockJob::new("build-1"));

        global.arm(job.clone()).await;
        assert_eq!(
            sup.armed_timeout(job.id()).await,
            Some(Duration::from_secs(15 * 60))
        );

        global.cancel(job.id()).await;
        assert!(!sup.is_armed(job.id()).await);
    }
}
