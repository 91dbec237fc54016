//! # Shared delayed-fire scheduler.
//!
//! One [`Scheduler`] serves every supervised job: it submits delayed fire
//! tasks to the runtime and hands back a cancellable [`ScheduledTimer`]. The
//! at-most-once guarantee lives here, in [`TimerState`]: a single atomic cell
//! per timer whose `Armed → {Fired | Cancelled}` transitions are guarded by
//! compare-and-swap, so the completion/deadline race resolves to exactly one
//! winner and the loser's path is a defined no-op.
//!
//! ## Rules
//! - Arming is non-blocking: `schedule` spawns and returns immediately.
//! - `ScheduledTimer::cancel` is idempotent and safe after firing.
//! - `shutdown` cancels every pending fire through the shared runtime token
//!   and publishes `SchedulerDrained` with the outstanding count.

use std::future::Future;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event, EventKind};

const ARMED: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// Atomic per-timer state cell: `Armed → {Fired | Cancelled}`, terminal.
#[derive(Debug)]
pub(crate) struct TimerState(AtomicU8);

impl TimerState {
    fn new() -> Self {
        Self(AtomicU8::new(ARMED))
    }

    /// Attempts the `Armed → Fired` transition. True for exactly one caller.
    fn try_fire(&self) -> bool {
        self.0
            .compare_exchange(ARMED, FIRED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Attempts the `Armed → Cancelled` transition. True for exactly one
    /// caller, and never after a successful fire.
    fn try_cancel(&self) -> bool {
        self.0
            .compare_exchange(ARMED, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn is_armed(&self) -> bool {
        self.0.load(Ordering::Acquire) == ARMED
    }
}

/// Cancellable handle to a scheduled delayed fire.
///
/// Owned exclusively by the registry entry for its job; dropping it does not
/// cancel the timer (the fire task holds its own state reference).
#[derive(Debug)]
pub struct ScheduledTimer {
    timeout: Duration,
    state: Arc<TimerState>,
    token: CancellationToken,
}

impl ScheduledTimer {
    /// The armed (floor-clamped) duration.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the timer is still armed (neither fired nor cancelled).
    pub fn is_armed(&self) -> bool {
        self.state.is_armed()
    }

    /// Cancels the timer if it has not fired.
    ///
    /// Returns `true` if this call performed the cancellation, `false` if the
    /// timer had already fired or been cancelled (a defined no-op, never an
    /// error). Safe to call any number of times.
    pub fn cancel(&self) -> bool {
        let won = self.state.try_cancel();
        if won {
            self.token.cancel();
        }
        won
    }
}

/// Shared scheduler for delayed remediation fires.
///
/// Cheap to clone; all clones share the runtime token and the outstanding
/// counter.
#[derive(Clone, Debug)]
pub struct Scheduler {
    runtime_token: CancellationToken,
    outstanding: Arc<AtomicU64>,
    bus: Bus,
}

impl Scheduler {
    /// Creates a scheduler publishing diagnostics to `bus`.
    pub fn new(bus: Bus) -> Self {
        Self {
            runtime_token: CancellationToken::new(),
            outstanding: Arc::new(AtomicU64::new(0)),
            bus,
        }
    }

    /// Token cancelled when the scheduler shuts down.
    pub(crate) fn runtime_token(&self) -> &CancellationToken {
        &self.runtime_token
    }

    /// Submits a delayed fire and returns its cancellable handle.
    ///
    /// `fire` runs only if the timer wins the `Armed → Fired` transition; a
    /// cancellation observed during the sleep discards it. The future runs on
    /// a runtime task, so a panic inside it cannot take other timers down.
    pub fn schedule<F>(&self, timeout: Duration, fire: F) -> ScheduledTimer
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let state = Arc::new(TimerState::new());
        let token = self.runtime_token.child_token();

        self.outstanding.fetch_add(1, Ordering::SeqCst);
        let outstanding = Arc::clone(&self.outstanding);
        let task_state = Arc::clone(&state);
        let task_token = token.clone();

        // Anchor the deadline at schedule time, not at the task's first poll.
        let sleep = time::sleep(timeout);
        tokio::spawn(async move {
            tokio::select! {
                _ = sleep => {
                    if task_state.try_fire() {
                        fire.await;
                    }
                }
                _ = task_token.cancelled() => {}
            }
            outstanding.fetch_sub(1, Ordering::SeqCst);
        });

        ScheduledTimer {
            timeout,
            state,
            token,
        }
    }

    /// Number of timer tasks currently pending.
    pub fn outstanding(&self) -> u64 {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Drains the scheduler: cancels every pending fire and reports how many
    /// were outstanding. Never panics; callable more than once.
    pub fn shutdown(&self) {
        let pending = self.outstanding();
        self.runtime_token.cancel();
        self.bus
            .publish(Event::now(EventKind::SchedulerDrained).with_outstanding(pending));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let bus = Bus::new(16);
        let sched = Scheduler::new(bus);
        let fired = Arc::new(AtomicUsize::new(0));

        let f = Arc::clone(&fired);
        let timer = sched.schedule(Duration::from_secs(5), async move {
            f.fetch_add(1, Ordering::SeqCst);
        });

        time::advance(Duration::from_secs(4)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(timer.is_armed());

        time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_fire_and_is_idempotent() {
        let bus = Bus::new(16);
        let sched = Scheduler::new(bus);
        let fired = Arc::new(AtomicUsize::new(0));

        let f = Arc::clone(&fired);
        let timer = sched.schedule(Duration::from_secs(5), async move {
            f.fetch_add(1, Ordering::SeqCst);
        });

        assert!(timer.cancel());
        assert!(!timer.cancel());

        time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(sched.outstanding(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_fire_is_noop() {
        let bus = Bus::new(16);
        let sched = Scheduler::new(bus);
        let fired = Arc::new(AtomicUsize::new(0));

        let f = Arc::clone(&fired);
        let timer = sched.schedule(Duration::from_millis(10), async move {
            f.fetch_add(1, Ordering::SeqCst);
        });

        time::advance(Duration::from_millis(20)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        assert!(!timer.cancel());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_drains_and_reports_outstanding() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let sched = Scheduler::new(bus);

        for _ in 0..3 {
            let _ = sched.schedule(Duration::from_secs(3600), async {});
        }
        assert_eq!(sched.outstanding(), 3);

        sched.shutdown();
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::SchedulerDrained);
        assert_eq!(ev.outstanding, Some(3));

        tokio::task::yield_now().await;
        assert_eq!(sched.outstanding(), 0);
    }
}
