//! RemoveLastItemHandler - undoes the most recent registration (LIFO).

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::lookup::{record_failure, require_active_session, require_hub};
use crate::application::HubLocks;
use crate::domain::foundation::{ErrorCode, HubId, RequestContext};
use crate::domain::item::Item;
use crate::domain::{IntakeError, NotFoundKind};
use crate::ports::{HubRepository, IntakeObserver, ItemRepository, SessionRepository};

/// Command to remove the newest item of a hub's active session.
#[derive(Debug, Clone)]
pub struct RemoveLastItemCommand {
    pub hub_id: HubId,
}

/// Handler for removing the last item.
pub struct RemoveLastItemHandler {
    hubs: Arc<dyn HubRepository>,
    sessions: Arc<dyn SessionRepository>,
    items: Arc<dyn ItemRepository>,
    observer: Arc<dyn IntakeObserver>,
    locks: Arc<HubLocks>,
}

impl RemoveLastItemHandler {
    pub fn new(
        hubs: Arc<dyn HubRepository>,
        sessions: Arc<dyn SessionRepository>,
        items: Arc<dyn ItemRepository>,
        observer: Arc<dyn IntakeObserver>,
        locks: Arc<HubLocks>,
    ) -> Self {
        Self {
            hubs,
            sessions,
            items,
            observer,
            locks,
        }
    }

    /// Returns the item that was removed.
    #[tracing::instrument(
        name = "remove_last_item",
        skip_all,
        fields(
            hub_id = %cmd.hub_id,
            correlation_id = %ctx.correlation_id(),
            source = ctx.source()
        )
    )]
    pub async fn handle(
        &self,
        cmd: RemoveLastItemCommand,
        ctx: RequestContext,
    ) -> Result<Item, IntakeError> {
        self.execute(cmd.hub_id).await.inspect_err(record_failure)
    }

    async fn execute(&self, hub_id: HubId) -> Result<Item, IntakeError> {
        let _guard = self.locks.acquire(hub_id).await;

        let hub = require_hub(self.hubs.as_ref(), &hub_id).await?;
        let session = require_active_session(self.sessions.as_ref(), &hub_id).await?;

        let last = self
            .items
            .find_most_recent_for_session(session.id())
            .await
            .map_err(|e| {
                IntakeError::upstream("find_last_item", format!("session {}", session.id()), e)
            })?
            .ok_or(NotFoundKind::NoItem(hub_id))?;

        // A zero-row delete means another writer got there first.
        self.items.delete_by_id(last.id()).await.map_err(|e| {
            if e.is(ErrorCode::ItemNotFound) {
                NotFoundKind::NoItem(hub_id).into()
            } else {
                IntakeError::upstream("delete_item", format!("item {}", last.id()), e)
            }
        })?;

        self.observer.item_removed(&hub, &last);
        info!(item_id = %last.id(), session_id = %session.id(), "item removed");

        Ok(last)
    }
}
