//! # Global engine configuration.
//!
//! Provides [`Config`] centralized settings for the supervision runtime.
//!
//! ## Sentinel values
//! - `floor = 0s` → no minimum clamp on computed timeouts
//! - `bus_capacity` is clamped to a minimum of 1 by the bus

use std::time::Duration;

use crate::policy::TimeoutPolicy;

/// Minimum armed timeout applied by default.
///
/// Computed durations below the floor are raised to it before arming; the
/// clamp is what keeps pathological near-zero timers from firing during
/// setup races.
pub const DEFAULT_FLOOR: Duration = Duration::from_secs(3 * 60);

/// Global configuration for the supervision engine.
///
/// ## Field semantics
/// - `floor`: minimum armed timeout (`0s` = no clamp)
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by the bus)
/// - `global`: server-wide policy applied by
///   [`GlobalSupervisor`](crate::GlobalSupervisor); `None` = global
///   supervision opts out entirely
#[derive(Clone)]
pub struct Config {
    /// Minimum permitted computed timeout.
    ///
    /// Every strategy result is raised to this value before a timer is
    /// armed. `0s` disables the clamp.
    pub floor: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` messages
    /// will skip older items. Minimum value is 1 (enforced by the bus).
    pub bus_capacity: usize,

    /// Server-wide policy applied uniformly to every job.
    ///
    /// Used only by the global supervisor variant; per-job arming always
    /// takes an explicit policy. `None` means no global timer is ever armed.
    pub global: Option<TimeoutPolicy>,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `floor = 3m`
    /// - `bus_capacity = 1024`
    /// - `global = None`
    fn default() -> Self {
        Self {
            floor: DEFAULT_FLOOR,
            bus_capacity: 1024,
            global: None,
        }
    }
}

impl Config {
    /// Applies the floor clamp to a computed duration.
    ///
    /// Returns `computed` unchanged when the floor is disabled (`0s`).
    pub fn clamp_to_floor(&self, computed: Duration) -> Duration {
        computed.max(self.floor)
    }
}
