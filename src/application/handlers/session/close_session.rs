//! CloseSessionHandler - closes the hub's active session.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::lookup::{record_failure, require_current_session, require_hub};
use crate::application::HubLocks;
use crate::domain::foundation::{HubId, RequestContext};
use crate::domain::session::Session;
use crate::domain::{ConflictKind, IntakeError};
use crate::ports::{HubRepository, IntakeObserver, SessionRepository};

/// Command to close the active session of a hub.
#[derive(Debug, Clone)]
pub struct CloseSessionCommand {
    pub hub_id: HubId,
}

/// Handler for closing sessions.
pub struct CloseSessionHandler {
    hubs: Arc<dyn HubRepository>,
    sessions: Arc<dyn SessionRepository>,
    observer: Arc<dyn IntakeObserver>,
    locks: Arc<HubLocks>,
}

impl CloseSessionHandler {
    pub fn new(
        hubs: Arc<dyn HubRepository>,
        sessions: Arc<dyn SessionRepository>,
        observer: Arc<dyn IntakeObserver>,
        locks: Arc<HubLocks>,
    ) -> Self {
        Self {
            hubs,
            sessions,
            observer,
            locks,
        }
    }

    /// Returns the session as persisted after closing.
    #[tracing::instrument(
        name = "close_session",
        skip_all,
        fields(
            hub_id = %cmd.hub_id,
            correlation_id = %ctx.correlation_id(),
            source = ctx.source()
        )
    )]
    pub async fn handle(
        &self,
        cmd: CloseSessionCommand,
        ctx: RequestContext,
    ) -> Result<Session, IntakeError> {
        self.execute(cmd.hub_id).await.inspect_err(record_failure)
    }

    async fn execute(&self, hub_id: HubId) -> Result<Session, IntakeError> {
        let _guard = self.locks.acquire(hub_id).await;

        require_hub(self.hubs.as_ref(), &hub_id).await?;
        let mut current = require_current_session(self.sessions.as_ref(), &hub_id).await?;

        // The lifecycle rejects closing anything but an active session.
        current
            .close()
            .map_err(|_| ConflictKind::NoActiveSession(hub_id))?;

        let closed = self
            .sessions
            .mark_closed(current.id())
            .await
            .map_err(|e| IntakeError::upstream("close_session", format!("session {}", current.id()), e))?;

        self.observer.session_closed(&closed);
        info!(session_id = %closed.id(), "session closed");

        Ok(closed)
    }
}
