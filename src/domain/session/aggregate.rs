//! Session entity.
//!
//! An intake session is a bounded window at a hub during which items may be
//! registered. A hub may have many historical sessions; the most recently
//! started one is its "current" session.

use crate::domain::foundation::{
    HubId, SessionId, SessionStatus, StateMachine, Timestamp, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Intake session.
///
/// # Invariants
///
/// - Created `Active`
/// - Only transition is `Active -> Closed`; a closed session is never reopened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    hub_id: HubId,
    started_at: Timestamp,
    status: SessionStatus,
}

impl Session {
    /// Start a new active session for a hub.
    pub fn open(id: SessionId, hub_id: HubId, started_at: Timestamp) -> Self {
        Self {
            id,
            hub_id,
            started_at,
            status: SessionStatus::Active,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        hub_id: HubId,
        started_at: Timestamp,
        status: SessionStatus,
    ) -> Self {
        Self {
            id,
            hub_id,
            started_at,
            status,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn hub_id(&self) -> &HubId {
        &self.hub_id
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns true while items may be added or removed.
    pub fn is_active(&self) -> bool {
        self.status.is_mutable()
    }

    /// Close the session.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat("state_transition")` if already closed
    pub fn close(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(SessionStatus::Closed)?;
        Ok(())
    }

    /// Deterministic ordering key used inside report entries.
    pub fn ordering_key(&self) -> (Timestamp, SessionId) {
        (self.started_at, self.id)
    }
}
