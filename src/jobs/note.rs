//! # First-writer-wins timeout annotation cell.
//!
//! A job records **at most one** timed-out marker; later attempts (a Fail
//! operation after an Abort already marked it, a re-fired global policy) must
//! be silent no-ops. [`TimeoutNote`] is the reusable cell hosts embed in
//! their [`Job`](crate::Job) implementations to get that semantic.

use std::sync::OnceLock;

/// At-most-once container for the "this job timed out" marker.
///
/// `set` is linearizable: exactly one caller observes `true` over the life of
/// the cell, regardless of concurrency.
#[derive(Debug, Default)]
pub struct TimeoutNote {
    reason: OnceLock<String>,
}

impl TimeoutNote {
    /// Creates an empty note.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the timeout reason. First writer wins.
    ///
    /// Returns `true` if this call stored the reason, `false` if a reason was
    /// already present (the call is a no-op).
    pub fn set(&self, reason: impl Into<String>) -> bool {
        self.reason.set(reason.into()).is_ok()
    }

    /// Returns the recorded reason, if any.
    pub fn reason(&self) -> Option<&str> {
        self.reason.get().map(String::as_str)
    }

    /// Whether a timeout has been recorded.
    pub fn is_set(&self) -> bool {
        self.reason.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_writer_wins() {
        let note = TimeoutNote::new();
        assert!(!note.is_set());

        assert!(note.set("deadline reached after 60m"));
        assert!(!note.set("second attempt"));

        assert_eq!(note.reason(), Some("deadline reached after 60m"));
    }

    #[test]
    fn test_concurrent_writers_one_wins() {
        use std::sync::Arc;

        let note = Arc::new(TimeoutNote::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let n = Arc::clone(&note);
            handles.push(std::thread::spawn(move || n.set(format!("writer-{i}"))));
        }

        let wins: usize = handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum();
        assert_eq!(wins, 1);
        assert!(note.is_set());
    }
}
