//! Recording job double used across the crate's tests.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::JobError;
use crate::jobs::{CompletedRun, Job, JobId, TerminalStatus, TimeoutNote};

/// In-memory [`Job`] that records every command issued to it.
pub(crate) struct MockJob {
    id: JobId,
    pub elapsed: Duration,
    pub estimated_remaining: Option<Duration>,
    pub history: Vec<CompletedRun>,
    pub supports_restart: bool,
    pub restart_count: u32,
    pub fail_interrupt: bool,
    pub fail_expand: bool,

    pub interrupts: Mutex<Vec<TerminalStatus>>,
    pub description: Mutex<Option<String>>,
    pub env: Mutex<Vec<(String, String)>>,
    pub restarts_scheduled: AtomicU32,
    pub interrupt_count: AtomicUsize,
    pub note: TimeoutNote,
}

impl MockJob {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: JobId::new(id),
            elapsed: Duration::ZERO,
            estimated_remaining: None,
            history: Vec::new(),
            supports_restart: false,
            restart_count: 0,
            fail_interrupt: false,
            fail_expand: false,
            interrupts: Mutex::new(Vec::new()),
            description: Mutex::new(None),
            env: Mutex::new(Vec::new()),
            restarts_scheduled: AtomicU32::new(0),
            interrupt_count: AtomicUsize::new(0),
            note: TimeoutNote::new(),
        }
    }

    pub(crate) fn interrupted_with(&self) -> Vec<TerminalStatus> {
        self.interrupts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Job for MockJob {
    fn id(&self) -> &JobId {
        &self.id
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn estimated_remaining(&self) -> Option<Duration> {
        self.estimated_remaining
    }

    fn history(&self) -> Vec<CompletedRun> {
        self.history.clone()
    }

    fn restart_count(&self) -> u32 {
        self.restart_count
    }

    fn supports_restart(&self) -> bool {
        self.supports_restart
    }

    fn expand(&self, template: &str) -> Result<String, JobError> {
        if self.fail_expand {
            return Err(JobError::new("unresolved macro"));
        }
        // Test-grade expansion: a single well-known variable.
        Ok(template.replace("${JOB}", self.id.as_str()))
    }

    async fn interrupt(&self, status: TerminalStatus) -> Result<(), JobError> {
        self.interrupt_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_interrupt {
            return Err(JobError::new("executor gone"));
        }
        self.interrupts.lock().unwrap().push(status);
        Ok(())
    }

    async fn mark_timed_out(&self, reason: &str) -> Result<bool, JobError> {
        Ok(self.note.set(reason))
    }

    async fn set_description(&self, text: &str) -> Result<(), JobError> {
        *self.description.lock().unwrap() = Some(text.to_string());
        Ok(())
    }

    async fn publish_env(&self, name: &str, value: &str) -> Result<(), JobError> {
        self.env
            .lock()
            .unwrap()
            .push((name.to_string(), value.to_string()));
        Ok(())
    }

    async fn schedule_restart(&self) -> Result<(), JobError> {
        self.restarts_scheduled.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
