//! Engine core: timers, registry, and the supervision lifecycle.
//!
//! Internal modules:
//! - [`scheduler`]: shared delayed-fire executor with atomic per-timer state;
//! - [`registry`]: process-wide job → armed-timer map;
//! - [`supervisor`]: arm/fire/cancel orchestration and the activity reset;
//! - [`global`]: server-wide policy variant;
//! - [`builder`]: wiring of bus, fan-out, registry, scheduler;
//! - [`config`]: floor clamp and runtime settings.

pub(crate) mod builder;
mod config;
mod global;
mod registry;
mod scheduler;
mod supervisor;

pub use builder::SupervisorBuilder;
pub use config::{Config, DEFAULT_FLOOR};
pub use global::GlobalSupervisor;
pub use registry::TimerRegistry;
pub use scheduler::{ScheduledTimer, Scheduler};
pub use supervisor::Supervisor;
