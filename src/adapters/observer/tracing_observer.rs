//! Observer that turns intake notifications into structured `tracing` events.

use tracing::info;

use crate::domain::hub::Hub;
use crate::domain::item::Item;
use crate::domain::session::Session;
use crate::ports::IntakeObserver;

/// Emits one `info` event per notification under the `intake::audit` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl IntakeObserver for TracingObserver {
    fn hub_registered(&self, hub: &Hub) {
        info!(
            target: "intake::audit",
            hub_id = %hub.id(),
            location = hub.location(),
            "hub_registered"
        );
    }

    fn session_opened(&self, session: &Session) {
        info!(
            target: "intake::audit",
            hub_id = %session.hub_id(),
            session_id = %session.id(),
            started_at = %session.started_at(),
            "session_opened"
        );
    }

    fn session_closed(&self, session: &Session) {
        info!(
            target: "intake::audit",
            hub_id = %session.hub_id(),
            session_id = %session.id(),
            "session_closed"
        );
    }

    fn item_added(&self, hub: &Hub, item: &Item) {
        info!(
            target: "intake::audit",
            hub_id = %hub.id(),
            session_id = %item.session_id(),
            item_id = %item.id(),
            item_type = %item.item_type(),
            "item_added"
        );
    }

    fn item_removed(&self, hub: &Hub, item: &Item) {
        info!(
            target: "intake::audit",
            hub_id = %hub.id(),
            session_id = %item.session_id(),
            item_id = %item.id(),
            "item_removed"
        );
    }
}
