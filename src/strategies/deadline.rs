//! # Deadline strategy: run until a wall-clock time of day.
//!
//! The configured text is macro-expanded through the job, then parsed as
//! `H:MM[:SS]` (24-hour). The budget is the distance from now to today's
//! occurrence of that moment:
//!
//! - already past, but within the tolerance window → zero (fire immediately);
//! - already past, outside tolerance → roll forward one day at a time until
//!   the moment is in the future;
//! - otherwise → that moment minus now.
//!
//! Parse or expansion failure is a configuration error surfaced to the
//! caller; the job then runs unsupervised (fail open), never with a silently
//! invented deadline.

use std::time::Duration;

use time::{Duration as TimeDuration, OffsetDateTime, Time};

use crate::error::StrategyError;
use crate::jobs::Job;
use crate::strategies::Strategy;

/// Wall-clock deadline at a fixed time of day.
#[derive(Clone, Debug)]
pub struct DeadlineStrategy {
    /// Time-of-day text, `H:MM[:SS]`; may contain job environment macros.
    pub time: String,
    /// How far past the deadline still counts as "fire immediately".
    pub tolerance: Duration,
}

impl DeadlineStrategy {
    /// Creates a deadline strategy.
    pub fn new(time: impl Into<String>, tolerance: Duration) -> Self {
        Self {
            time: time.into(),
            tolerance,
        }
    }

    /// Budget from `now` to the next qualifying occurrence of `deadline`.
    pub(crate) fn timeout_from(&self, deadline: Time, now: OffsetDateTime) -> Duration {
        let mut at = now.replace_time(deadline);
        if at <= now {
            let past: Duration = (now - at).try_into().unwrap_or(Duration::ZERO);
            if past <= self.tolerance {
                return Duration::ZERO;
            }
            while at <= now {
                at += TimeDuration::days(1);
            }
        }
        (at - now).try_into().unwrap_or(Duration::ZERO)
    }
}

/// Parses `H:MM[:SS]` (24-hour) into a [`Time`].
fn parse_time_of_day(text: &str) -> Result<Time, StrategyError> {
    let invalid = |reason: &str| StrategyError::InvalidDeadline {
        text: text.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = text.trim().split(':');
    let hour: u8 = parts
        .next()
        .filter(|p| !p.is_empty())
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| invalid("missing or non-numeric hour"))?;
    let minute: u8 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| invalid("missing or non-numeric minute"))?;
    let second: u8 = match parts.next() {
        Some(p) => p.parse().map_err(|_| invalid("non-numeric second"))?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(invalid("too many components"));
    }

    Time::from_hms(hour, minute, second).map_err(|_| invalid("out of range"))
}

impl Strategy for DeadlineStrategy {
    fn name(&self) -> &'static str {
        "deadline"
    }

    fn compute(&self, job: &dyn Job) -> Result<Duration, StrategyError> {
        let text = job
            .expand(&self.time)
            .map_err(|e| StrategyError::Expansion {
                error: e.to_string(),
            })?;
        let deadline = parse_time_of_day(&text)?;

        // Server-local time of day; UTC when no local offset is available.
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Ok(self.timeout_from(deadline, now))
    }
}
