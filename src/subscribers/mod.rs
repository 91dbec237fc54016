//! Event subscribers: the observability extension point.
//!
//! ## Contents
//! - [`Subscribe`] subscriber contract (bounded queue, tolerant of slow impls)
//! - [`SubscriberSet`] non-blocking fan-out with panic/overflow isolation
//! - [`LogWriter`] simple stdout printer (feature `logging`, demo/reference)

mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
