//! # Timer registry: the process-wide job → armed-timer map.
//!
//! The registry is the only shared mutable job-keyed state in the engine.
//! All mutation goes through two primitives:
//! - [`TimerRegistry::insert`] — insert-if-absent; a duplicate arm hands the
//!   new timer back to the caller untouched.
//! - [`TimerRegistry::remove`] — remove-and-return; both the fire path and
//!   the cancel path funnel through it, so for any job exactly one side
//!   obtains the handle.
//!
//! ## Rules
//! - At most one armed timer per job id at any time.
//! - Removal of an absent entry is a defined no-op (the other side of the
//!   race already claimed it).
//! - Query methods exist for diagnostics/testing and are eventually
//!   consistent with in-flight transitions.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::core::scheduler::ScheduledTimer;
use crate::jobs::JobId;

/// Process-wide map from job id to the currently armed timer.
pub struct TimerRegistry {
    timers: RwLock<HashMap<JobId, ScheduledTimer>>,
}

impl TimerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            timers: RwLock::new(HashMap::new()),
        }
    }

    /// Atomically stores `timer` under `id` unless an entry already exists.
    ///
    /// On an occupied slot the new timer is returned to the caller (the
    /// existing supervision stays untouched); the caller cancels it and logs
    /// the duplicate arm.
    pub async fn insert(&self, id: JobId, timer: ScheduledTimer) -> Result<(), ScheduledTimer> {
        let mut timers = self.timers.write().await;
        match timers.entry(id) {
            std::collections::hash_map::Entry::Occupied(_) => Err(timer),
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(timer);
                Ok(())
            }
        }
    }

    /// Atomically removes and returns the entry for `id`, if present.
    pub async fn remove(&self, id: &JobId) -> Option<ScheduledTimer> {
        self.timers.write().await.remove(id)
    }

    /// The armed duration for `id`, if a timer is currently armed.
    pub async fn armed_timeout(&self, id: &JobId) -> Option<std::time::Duration> {
        self.timers
            .read()
            .await
            .get(id)
            .filter(|t| t.is_armed())
            .map(ScheduledTimer::timeout)
    }

    /// Whether a timer is currently armed for `id`.
    pub async fn is_armed(&self, id: &JobId) -> bool {
        self.armed_timeout(id).await.is_some()
    }

    /// Sorted list of job ids with registered timers.
    pub async fn list(&self) -> Vec<JobId> {
        let timers = self.timers.read().await;
        let mut ids: Vec<JobId> = timers.keys().cloned().collect();
        ids.sort_unstable_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }

    /// True when no timers are registered.
    pub async fn is_empty(&self) -> bool {
        self.timers.read().await.is_empty()
    }

    /// Removes every entry, cancelling each still-armed timer.
    pub async fn drain(&self) {
        let drained: Vec<(JobId, ScheduledTimer)> = {
            let mut timers = self.timers.write().await;
            timers.drain().collect()
        };
        for (_, timer) in drained {
            timer.cancel();
        }
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
