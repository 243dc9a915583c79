//! IntakeObserver port - business-event callbacks.
//!
//! Handlers receive an observer at construction and call it only after a
//! mutation has been persisted. Observers must not fail the use case, so the
//! callbacks return nothing; every method defaults to a no-op.

use crate::domain::hub::Hub;
use crate::domain::item::Item;
use crate::domain::session::Session;

/// Receives notifications about successful intake mutations.
pub trait IntakeObserver: Send + Sync {
    /// A hub was registered.
    fn hub_registered(&self, _hub: &Hub) {}

    /// A session was opened.
    fn session_opened(&self, _session: &Session) {}

    /// A session was closed.
    fn session_closed(&self, _session: &Session) {}

    /// An item was added to the hub's active session.
    fn item_added(&self, _hub: &Hub, _item: &Item) {}

    /// The most recent item of the hub's active session was removed.
    fn item_removed(&self, _hub: &Hub, _item: &Item) {}
}
