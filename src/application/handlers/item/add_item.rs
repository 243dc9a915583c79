//! AddItemHandler - registers an item in the hub's active session.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::lookup::{record_failure, require_active_session, require_hub};
use crate::application::HubLocks;
use crate::domain::foundation::{HubId, ItemId, ItemType, RequestContext};
use crate::domain::item::Item;
use crate::domain::IntakeError;
use crate::ports::{Clock, HubRepository, IntakeObserver, ItemRepository, SessionRepository};

/// Command to add one item to a hub's active session.
#[derive(Debug, Clone)]
pub struct AddItemCommand {
    pub hub_id: HubId,
    pub item_type: ItemType,
}

/// Handler for adding items.
pub struct AddItemHandler {
    hubs: Arc<dyn HubRepository>,
    sessions: Arc<dyn SessionRepository>,
    items: Arc<dyn ItemRepository>,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn IntakeObserver>,
    locks: Arc<HubLocks>,
}

impl AddItemHandler {
    pub fn new(
        hubs: Arc<dyn HubRepository>,
        sessions: Arc<dyn SessionRepository>,
        items: Arc<dyn ItemRepository>,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn IntakeObserver>,
        locks: Arc<HubLocks>,
    ) -> Self {
        Self {
            hubs,
            sessions,
            items,
            clock,
            observer,
            locks,
        }
    }

    #[tracing::instrument(
        name = "add_item",
        skip_all,
        fields(
            hub_id = %cmd.hub_id,
            item_type = %cmd.item_type,
            correlation_id = %ctx.correlation_id(),
            source = ctx.source()
        )
    )]
    pub async fn handle(&self, cmd: AddItemCommand, ctx: RequestContext) -> Result<Item, IntakeError> {
        self.execute(cmd).await.inspect_err(record_failure)
    }

    async fn execute(&self, cmd: AddItemCommand) -> Result<Item, IntakeError> {
        let _guard = self.locks.acquire(cmd.hub_id).await;

        let hub = require_hub(self.hubs.as_ref(), &cmd.hub_id).await?;
        let session = require_active_session(self.sessions.as_ref(), &cmd.hub_id).await?;

        let item = Item::register(ItemId::new(), *session.id(), cmd.item_type, self.clock.now());
        self.items
            .save(&item)
            .await
            .map_err(|e| IntakeError::upstream("save_item", format!("session {}", session.id()), e))?;

        self.observer.item_added(&hub, &item);
        info!(item_id = %item.id(), session_id = %session.id(), "item added");

        Ok(item)
    }
}
