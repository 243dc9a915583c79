//! IntakeObserver adapters.
//!
//! - `CountingObserver` - in-process counters per location and hub
//! - `TracingObserver` - structured audit events
//! - `NoopObserver` - ignores everything
//! - `FanoutObserver` - forwards to several observers in order

mod counting;
mod tracing_observer;

use std::sync::Arc;

pub use counting::{CountingObserver, IntakeCounters};
pub use tracing_observer::TracingObserver;

use crate::domain::hub::Hub;
use crate::domain::item::Item;
use crate::domain::session::Session;
use crate::ports::IntakeObserver;

/// Observer that relies on the trait's no-op defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl IntakeObserver for NoopObserver {}

/// Forwards every notification to each inner observer.
#[derive(Clone, Default)]
pub struct FanoutObserver {
    observers: Vec<Arc<dyn IntakeObserver>>,
}

impl FanoutObserver {
    pub fn new(observers: Vec<Arc<dyn IntakeObserver>>) -> Self {
        Self { observers }
    }

    pub fn with(mut self, observer: Arc<dyn IntakeObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

impl IntakeObserver for FanoutObserver {
    fn hub_registered(&self, hub: &Hub) {
        self.observers.iter().for_each(|o| o.hub_registered(hub));
    }

    fn session_opened(&self, session: &Session) {
        self.observers.iter().for_each(|o| o.session_opened(session));
    }

    fn session_closed(&self, session: &Session) {
        self.observers.iter().for_each(|o| o.session_closed(session));
    }

    fn item_added(&self, hub: &Hub, item: &Item) {
        self.observers.iter().for_each(|o| o.item_added(hub, item));
    }

    fn item_removed(&self, hub: &Hub, item: &Item) {
        self.observers.iter().for_each(|o| o.item_removed(hub, item));
    }
}
