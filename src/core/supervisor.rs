//! # Supervisor: arms, cancels, and races per-job deadline timers.
//!
//! The [`Supervisor`] owns the event bus, a [`SubscriberSet`], the
//! [`TimerRegistry`], and the shared [`Scheduler`]. Hosts wire their job
//! lifecycle into three entry points:
//!
//! - job started → [`Supervisor::arm`]
//! - job completed → [`Supervisor::cancel`]
//! - job produced output → [`Supervisor::on_activity`] (no-activity policies)
//!
//! ## Arm / fire / cancel flow
//! ```text
//! arm(job, policy):
//!   strategy.compute(job) ──Err──► publish StrategyFailed, no timer (fail open)
//!         │Ok(raw)
//!         ▼
//!   timeout = Config::clamp_to_floor(raw)
//!   publish computed timeout into job env (optional)
//!   scheduler.schedule(timeout, fire) ──► TimerRegistry::insert (if-absent)
//!         ├─ inserted  → publish TimerArmed
//!         └─ occupied  → cancel new timer, publish DuplicateArm
//!
//! fire (scheduler task, wins Armed→Fired CAS):
//!   publish TimerFired → OperationChain::run → registry.remove (unconditional)
//!
//! cancel(id) (job completion):
//!   registry.remove(id)
//!         ├─ entry won Armed→Cancelled → publish TimerCancelled
//!         ├─ entry already fired       → silent no-op (fire side cleans up)
//!         └─ no entry                  → silent no-op
//! ```
//!
//! Exactly one of {Fired, Cancelled} is observed per armed timer; the
//! per-timer state cell in the scheduler guarantees it.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;

use crate::core::{config::Config, registry::TimerRegistry, scheduler::Scheduler};
use crate::events::{Bus, Event, EventKind};
use crate::jobs::{Job, JobId};
use crate::operations::OperationChain;
use crate::policy::TimeoutPolicy;
use crate::subscribers::SubscriberSet;

/// Coordinates per-job deadline timers and remediation firing.
pub struct Supervisor {
    /// Global engine configuration.
    pub cfg: Config,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    registry: Arc<TimerRegistry>,
    scheduler: Scheduler,
}

impl Supervisor {
    /// Starts building a supervisor with the given configuration.
    pub fn builder(cfg: Config) -> crate::core::builder::SupervisorBuilder {
        crate::core::builder::SupervisorBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        bus: Bus,
        subs: Arc<SubscriberSet>,
        registry: Arc<TimerRegistry>,
        scheduler: Scheduler,
    ) -> Self {
        Self {
            cfg,
            bus,
            subs,
            registry,
            scheduler,
        }
    }

    /// Bus carrying every engine diagnostic; subscribe for ad-hoc listening.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Arms a deadline timer for `job` under `policy`.
    ///
    /// Strategy failure arms nothing and publishes `StrategyFailed`; the job
    /// then runs unsupervised. An arm for a job that already holds a timer is
    /// discarded with a `DuplicateArm` diagnostic.
    pub async fn arm(&self, job: Arc<dyn Job>, policy: &TimeoutPolicy) {
        self.arm_as(job, policy, EventKind::TimerArmed).await;
    }

    /// Cancels the armed timer for `id`, if any.
    ///
    /// Call on job completion. Cancelling an unarmed job, cancelling twice,
    /// or cancelling after the timer fired are all defined no-ops.
    pub async fn cancel(&self, id: &JobId) {
        if let Some(timer) = self.registry.remove(id).await {
            if timer.cancel() {
                self.bus
                    .publish(Event::now(EventKind::TimerCancelled).with_job(id.as_str()));
            }
            // Lost the race to the fire side: its cleanup already owns the
            // removal and remediation is underway.
        }
    }

    /// Output-event hook for activity-reset policies.
    ///
    /// For a strategy with `resets_on_activity()`, cancels the armed timer
    /// (if still armed) and re-arms a fresh one for the same quiet period,
    /// publishing `TimerReset`. A no-op for every other strategy, for
    /// unarmed jobs, and after the timer has fired.
    pub async fn on_activity(&self, job: Arc<dyn Job>, policy: &TimeoutPolicy) {
        if !policy.strategy().resets_on_activity() {
            return;
        }
        let id = job.id().clone();
        match self.registry.remove(&id).await {
            Some(timer) if timer.cancel() => {
                self.arm_as(job, policy, EventKind::TimerReset).await;
            }
            // Already fired (remediation underway) or never armed.
            _ => {}
        }
    }

    /// The armed (floor-clamped) duration for `id`, if a timer is armed.
    ///
    /// Diagnostics/testing query.
    pub async fn armed_timeout(&self, id: &JobId) -> Option<std::time::Duration> {
        self.registry.armed_timeout(id).await
    }

    /// Whether a timer is currently armed for `id`.
    pub async fn is_armed(&self, id: &JobId) -> bool {
        self.registry.is_armed(id).await
    }

    /// Drains the engine: cancels every armed timer and pending fire, then
    /// publishes `SchedulerDrained` with the outstanding count. Never throws.
    pub async fn shutdown(&self) {
        self.registry.drain().await;
        self.scheduler.shutdown();
    }

    /// Subscribes to the bus and forwards events to the subscriber set.
    ///
    /// Called once by the builder; exits when the scheduler drains.
    pub(crate) fn spawn_listener(&self) {
        let mut rx = self.bus.subscribe();
        let subs = Arc::clone(&self.subs);
        let token = self.scheduler.runtime_token().clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(ev) => subs.emit_arc(Arc::new(ev)),
                        Err(RecvError::Closed) => break,
                        Err(RecvError::Lagged(_)) => continue,
                    }
                }
            }
        });
    }

    async fn arm_as(&self, job: Arc<dyn Job>, policy: &TimeoutPolicy, kind: EventKind) {
        let id = job.id().clone();

        let raw = match policy.strategy().compute(job.as_ref()) {
            Ok(d) => d,
            Err(e) => {
                self.bus.publish(
                    Event::now(EventKind::StrategyFailed)
                        .with_job(id.as_str())
                        .with_error(format!("{}: {e}", policy.strategy().name())),
                );
                return;
            }
        };
        let timeout = self.cfg.clamp_to_floor(raw);

        if let Some(name) = policy.timeout_env() {
            if let Err(e) = job
                .publish_env(name, &timeout.as_millis().to_string())
                .await
            {
                self.bus.publish(
                    Event::now(EventKind::OperationWarning)
                        .with_job(id.as_str())
                        .with_operation("timeout_env")
                        .with_error(e.to_string()),
                );
            }
        }

        let chain = OperationChain::from_config(policy.operations());
        let fire_bus = self.bus.clone();
        let fire_registry = Arc::clone(&self.registry);
        let fire_job = Arc::clone(&job);
        let fire_id = id.clone();
        let fire = async move {
            fire_bus.publish(
                Event::now(EventKind::TimerFired)
                    .with_job(fire_id.as_str())
                    .with_timeout(timeout),
            );
            chain.run(fire_job.as_ref(), timeout, &fire_bus).await;
            // Unconditional: a stale handle must never block a later arm for
            // a reused job id, even when the chain halted.
            fire_registry.remove(&fire_id).await;
        };

        let timer = self.scheduler.schedule(timeout, fire);
        match self.registry.insert(id.clone(), timer).await {
            Ok(()) => {
                self.bus.publish(
                    Event::now(kind)
                        .with_job(id.as_str())
                        .with_timeout(timeout),
                );
            }
            Err(rejected) => {
                rejected.cancel();
                self.bus
                    .publish(Event::now(EventKind::DuplicateArm).with_job(id.as_str()));
            }
        }
    }
}
