//! Runtime events: types and broadcast bus.
//!
//! Groups the event **data model** and the **bus** used to publish/subscribe
//! to runtime events emitted by the supervisor, scheduler, operation chain,
//! and subscriber workers.
//!
//! ## Quick reference
//! - **Publishers**: `Supervisor` (arm/cancel/reset), scheduler fire tasks
//!   (`TimerFired`, chain events), `SubscriberSet` workers (overflow/panic).
//! - **Consumer**: the supervisor's fan-out listener, which forwards every
//!   event to the attached [`Subscribe`](crate::Subscribe) implementations.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
