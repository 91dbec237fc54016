//! # Supervisor builder: wires bus, fan-out, registry, and scheduler.

use std::sync::Arc;

use crate::core::{config::Config, registry::TimerRegistry, scheduler::Scheduler};
use crate::events::Bus;
use crate::subscribers::{Subscribe, SubscriberSet};

use super::supervisor::Supervisor;

/// Builder for constructing a [`Supervisor`] with optional subscribers.
pub struct SupervisorBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive engine events (arms, fires, chain halts, drain
    /// reports) through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Appends one subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Builds the supervisor and starts its event fan-out listener.
    pub fn build(self) -> Arc<Supervisor> {
        let bus = Bus::new(self.cfg.bus_capacity);
        let subs = Arc::new(SubscriberSet::new(self.subscribers, bus.clone()));
        let registry = Arc::new(TimerRegistry::new());
        let scheduler = Scheduler::new(bus.clone());

        let sup = Arc::new(Supervisor::new_internal(
            self.cfg, bus, subs, registry, scheduler,
        ));
        sup.spawn_listener();
        sup
    }
}
