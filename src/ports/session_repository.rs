//! Session repository port.
//!
//! Defines the contract for persisting and retrieving intake sessions.
//!
//! # Design
//!
//! - **Current session**: the most recently created session of a hub, by
//!   insertion order rather than `started_at`
//! - **No uniqueness guarantee required**: the one-active-session rule is
//!   enforced by the application layer; adapters may additionally enforce it
//!   and report a violation as `ActiveSessionExists`

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, HubId, SessionId};
use crate::domain::session::Session;

/// Repository port for session persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a newly opened session.
    ///
    /// # Errors
    ///
    /// - `ActiveSessionExists` if storage rejects a second active session
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Persist the closed state of a session and return the stored row.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn mark_closed(&self, id: &SessionId) -> Result<Session, DomainError>;

    /// Find the most recently created session of a hub.
    ///
    /// Returns `None` if the hub never had a session.
    async fn find_current_for_hub(&self, hub_id: &HubId) -> Result<Option<Session>, DomainError>;

    /// Fetch every session whose id is in `ids`.
    ///
    /// Empty input returns an empty vector.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if `ids` is non-empty and no session matched
    async fn find_by_ids(&self, ids: &[SessionId]) -> Result<Vec<Session>, DomainError>;
}
