//! # Short-circuiting chain of remediation operations.
//!
//! Executes operations in configured order on the scheduler task. A "stop"
//! return, an error, or a panic halts the chain immediately; remaining
//! operations do not run. Halts are published with enough context to diagnose
//! (job id, operation kind, armed duration) and are absorbed at the chain —
//! nothing escapes into the shared scheduler task, which would silently
//! disable supervision for every other job.
//!
//! ## Rules
//! - Empty configured list ⇒ a single implicit abort operation.
//! - Exactly one terminal event per run: `ChainCompleted` or `OperationHalted`.
//! - Panic isolation via `catch_unwind`, same idiom as the subscriber workers.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;

use crate::events::{Bus, Event, EventKind};
use crate::jobs::Job;
use crate::operations::{AbortOperation, Operation, OperationConfig, OperationContext};

/// Ordered, short-circuiting sequence of remediation operations.
pub struct OperationChain {
    ops: Vec<Arc<dyn Operation>>,
}

impl OperationChain {
    /// Creates a chain from explicit operations.
    ///
    /// An empty list is replaced by a single [`AbortOperation`].
    pub fn new(mut ops: Vec<Arc<dyn Operation>>) -> Self {
        if ops.is_empty() {
            ops.push(Arc::new(AbortOperation::new()));
        }
        Self { ops }
    }

    /// Builds a chain from configuration, in configured order.
    pub fn from_config(cfgs: &[OperationConfig]) -> Self {
        Self::new(cfgs.iter().map(OperationConfig::build).collect())
    }

    /// Number of operations in the chain.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Always false: an empty configuration still yields the implicit abort.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Runs the chain for one firing. Returns how many operations executed.
    ///
    /// Never panics and never returns an error: every failure mode ends in a
    /// published `OperationHalted` event.
    pub async fn run(&self, job: &dyn Job, timeout: Duration, bus: &Bus) -> usize {
        let ctx = OperationContext { job, timeout, bus };

        let halted = |op: &dyn Operation, error: Option<String>| {
            let mut ev = Event::now(EventKind::OperationHalted)
                .with_job(job.id().as_str())
                .with_operation(op.name())
                .with_timeout(timeout);
            if let Some(e) = error {
                ev = ev.with_error(e);
            }
            bus.publish(ev);
        };

        let mut executed = 0;
        for op in &self.ops {
            executed += 1;
            let attempt = std::panic::AssertUnwindSafe(op.perform(&ctx))
                .catch_unwind()
                .await;

            match attempt {
                Ok(Ok(true)) => continue,
                Ok(Ok(false)) => {
                    halted(op.as_ref(), None);
                    return executed;
                }
                Ok(Err(e)) => {
                    halted(op.as_ref(), Some(e.to_string()));
                    return executed;
                }
                Err(panic_err) => {
                    let info = {
                        let any = &*panic_err;
                        if let Some(msg) = any.downcast_ref::<&'static str>() {
                            (*msg).to_string()
                        } else if let Some(msg) = any.downcast_ref::<String>() {
                            msg.clone()
                        } else {
                            "unknown panic".to_string()
                        }
                    };
                    halted(op.as_ref(), Some(info));
                    return executed;
                }
            }
        }

        bus.publish(
            Event::now(EventKind::ChainCompleted)
                .with_job(job.id().as_str())
                .with_timeout(timeout),
        );
        executed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OperationError;
    use crate::jobs::mock::MockJob;
    use crate::jobs::TerminalStatus;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedOp {
        name: &'static str,
        result: bool,
        ran: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Operation for FixedOp {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn perform(&self, _ctx: &OperationContext<'_>) -> Result<bool, OperationError> {
            self.ran.fetch_add(1, Ordering::SeqCst);
            Ok(self.result)
        }
    }

    struct PanickingOp;

    #[async_trait]
    impl Operation for PanickingOp {
        fn name(&self) -> &'static str {
            "panicking"
        }

        async fn perform(&self, _ctx: &OperationContext<'_>) -> Result<bool, OperationError> {
            panic!("remediation went sideways");
        }
    }

    fn counted(name: &'static str, result: bool) -> (Arc<dyn Operation>, Arc<AtomicUsize>) {
        let ran = Arc::new(AtomicUsize::new(0));
        (
            Arc::new(FixedOp {
                name,
                result,
                ran: Arc::clone(&ran),
            }),
            ran,
        )
    }

    #[tokio::test]
    async fn test_short_circuit_on_stop() {
        let (a, a_ran) = counted("a", true);
        let (b, b_ran) = counted("b", false);
        let (c, c_ran) = counted("c", true);

        let job = MockJob::new("build-1");
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();

        let chain = OperationChain::new(vec![a, b, c]);
        let executed = chain.run(&job, Duration::from_secs(60), &bus).await;

        assert_eq!(executed, 2);
        assert_eq!(a_ran.load(Ordering::SeqCst), 1);
        assert_eq!(b_ran.load(Ordering::SeqCst), 1);
        assert_eq!(c_ran.load(Ordering::SeqCst), 0);

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::OperationHalted);
        assert_eq!(ev.operation.as_deref(), Some("b"));
        assert_eq!(ev.timeout, Some(Duration::from_secs(60)));
        assert!(ev.error.is_none());
    }

    #[tokio::test]
    async fn test_panic_halts_without_escaping() {
        let (tail, tail_ran) = counted("tail", true);

        let job = MockJob::new("build-1");
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();

        let chain = OperationChain::new(vec![Arc::new(PanickingOp), tail]);
        let executed = chain.run(&job, Duration::from_secs(60), &bus).await;

        assert_eq!(executed, 1);
        assert_eq!(tail_ran.load(Ordering::SeqCst), 0);

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::OperationHalted);
        assert_eq!(ev.operation.as_deref(), Some("panicking"));
        assert!(ev.error.as_deref().unwrap().contains("sideways"));
    }

    #[tokio::test]
    async fn test_empty_config_applies_implicit_abort() {
        let job = MockJob::new("build-1");
        let bus = Bus::new(16);

        let chain = OperationChain::from_config(&[]);
        assert_eq!(chain.len(), 1);
        chain.run(&job, Duration::from_secs(60), &bus).await;

        assert_eq!(job.interrupted_with(), vec![TerminalStatus::Aborted]);
    }

    #[tokio::test]
    async fn test_all_continue_publishes_completed() {
        let (a, _) = counted("a", true);
        let (b, _) = counted("b", true);

        let job = MockJob::new("build-1");
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();

        let chain = OperationChain::new(vec![a, b]);
        let executed = chain.run(&job, Duration::from_secs(60), &bus).await;
        assert_eq!(executed, 2);

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::ChainCompleted);
        assert_eq!(ev.job.as_deref(), Some("build-1"));
    }

    #[tokio::test]
    async fn test_error_halts_with_context() {
        let mut failing = MockJob::new("build-1");
        failing.fail_interrupt = true;

        let bus = Bus::new(16);
        let mut rx = bus.subscribe();

        let chain = OperationChain::new(vec![Arc::new(AbortOperation::new())]);
        chain.run(&failing, Duration::from_secs(60), &bus).await;

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::OperationHalted);
        assert_eq!(ev.job.as_deref(), Some("build-1"));
        assert_eq!(ev.operation.as_deref(), Some("abort"));
        assert!(ev.error.as_deref().unwrap().contains("executor gone"));
    }
}
