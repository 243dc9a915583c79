//! OpenSessionHandler - starts a new intake session at a hub.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::lookup::{record_failure, require_hub};
use crate::application::HubLocks;
use crate::domain::foundation::{ErrorCode, HubId, RequestContext, SessionId};
use crate::domain::session::Session;
use crate::domain::{ConflictKind, IntakeError};
use crate::ports::{Clock, HubRepository, IntakeObserver, SessionRepository};

/// Command to open a session at a hub.
#[derive(Debug, Clone)]
pub struct OpenSessionCommand {
    pub hub_id: HubId,
}

/// Handler for opening sessions.
pub struct OpenSessionHandler {
    hubs: Arc<dyn HubRepository>,
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn IntakeObserver>,
    locks: Arc<HubLocks>,
}

impl OpenSessionHandler {
    pub fn new(
        hubs: Arc<dyn HubRepository>,
        sessions: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn IntakeObserver>,
        locks: Arc<HubLocks>,
    ) -> Self {
        Self {
            hubs,
            sessions,
            clock,
            observer,
            locks,
        }
    }

    #[tracing::instrument(
        name = "open_session",
        skip_all,
        fields(
            hub_id = %cmd.hub_id,
            correlation_id = %ctx.correlation_id(),
            source = ctx.source()
        )
    )]
    pub async fn handle(
        &self,
        cmd: OpenSessionCommand,
        ctx: RequestContext,
    ) -> Result<Session, IntakeError> {
        self.execute(cmd.hub_id).await.inspect_err(record_failure)
    }

    async fn execute(&self, hub_id: HubId) -> Result<Session, IntakeError> {
        let _guard = self.locks.acquire(hub_id).await;

        // 1. Hub must exist
        require_hub(self.hubs.as_ref(), &hub_id).await?;

        // 2. No session may be active (a closed or absent one is fine)
        let current = self
            .sessions
            .find_current_for_hub(&hub_id)
            .await
            .map_err(|e| IntakeError::upstream("find_current_session", format!("hub {}", hub_id), e))?;
        if current.is_some_and(|s| s.is_active()) {
            return Err(ConflictKind::SessionAlreadyOpen(hub_id).into());
        }

        // 3. Persist; the store's unique index catches writers outside this process
        let session = Session::open(SessionId::new(), hub_id, self.clock.now());
        self.sessions.save(&session).await.map_err(|e| {
            if e.is(ErrorCode::ActiveSessionExists) {
                ConflictKind::SessionAlreadyOpen(hub_id).into()
            } else {
                IntakeError::upstream("save_session", format!("hub {}", hub_id), e)
            }
        })?;

        self.observer.session_opened(&session);
        info!(session_id = %session.id(), "session opened");

        Ok(session)
    }
}
