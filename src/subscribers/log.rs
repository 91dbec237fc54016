//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [armed] job="build-1" timeout=60s
//! [fired] job="build-1" timeout=60s
//! [halted] job="build-1" op="fail" err="interrupt failed: executor gone"
//! [cancelled] job="build-2"
//! [drained] outstanding=3
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event printer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Constructs a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::TimerArmed => {
                println!("[armed] job={:?} timeout={:?}", e.job, e.timeout);
            }
            EventKind::TimerFired => {
                println!("[fired] job={:?} timeout={:?}", e.job, e.timeout);
            }
            EventKind::TimerCancelled => {
                println!("[cancelled] job={:?}", e.job);
            }
            EventKind::TimerReset => {
                println!("[reset] job={:?} timeout={:?}", e.job, e.timeout);
            }
            EventKind::DuplicateArm => {
                println!("[duplicate-arm] job={:?}", e.job);
            }
            EventKind::StrategyFailed => {
                println!("[strategy-failed] job={:?} err={:?}", e.job, e.error);
            }
            EventKind::OperationHalted => {
                println!(
                    "[halted] job={:?} op={:?} timeout={:?} err={:?}",
                    e.job, e.operation, e.timeout, e.error
                );
            }
            EventKind::OperationWarning => {
                println!("[warning] job={:?} op={:?} err={:?}", e.job, e.operation, e.error);
            }
            EventKind::ChainCompleted => {
                println!("[chain-completed] job={:?}", e.job);
            }
            EventKind::SchedulerDrained => {
                println!("[drained] outstanding={:?}", e.outstanding);
            }
            EventKind::SubscriberOverflow => {
                println!("[subscriber-overflow] subscriber={:?} reason={:?}", e.job, e.error);
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={} info={}",
                    e.job.as_deref().unwrap_or("unknown"),
                    e.error.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
