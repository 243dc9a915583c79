//! In-memory SessionRepository.
//!
//! Mirrors the Postgres schema's guarantees: at most one active session per
//! hub (checked on save) and "current" meaning the last one saved.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, HubId, SessionId};
use crate::domain::session::Session;
use crate::ports::SessionRepository;

#[derive(Debug, Default)]
struct State {
    sessions: HashMap<SessionId, Session>,
    /// Insertion order; the last entry of a hub is its current session.
    order: Vec<SessionId>,
}

/// Session store backed by a `HashMap`. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    state: Arc<RwLock<State>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored session of a hub, oldest first.
    pub async fn sessions_of(&self, hub_id: &HubId) -> Vec<Session> {
        let state = self.state.read().await;
        state
            .order
            .iter()
            .filter_map(|id| state.sessions.get(id))
            .filter(|s| s.hub_id() == hub_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.sessions.contains_key(session.id()) {
            return Err(DomainError::database(format!(
                "Duplicate session id: {}",
                session.id()
            )));
        }
        if session.is_active()
            && state
                .sessions
                .values()
                .any(|s| s.hub_id() == session.hub_id() && s.is_active())
        {
            return Err(DomainError::new(
                ErrorCode::ActiveSessionExists,
                format!("Hub {} already has an active session", session.hub_id()),
            ));
        }
        state.sessions.insert(*session.id(), session.clone());
        state.order.push(*session.id());
        Ok(())
    }

    async fn mark_closed(&self, id: &SessionId) -> Result<Session, DomainError> {
        let mut state = self.state.write().await;
        let session = state.sessions.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::SessionNotFound, format!("Session not found: {}", id))
        })?;
        // Closing twice leaves the row closed, as an UPDATE would.
        if session.is_active() {
            session.close()?;
        }
        Ok(session.clone())
    }

    async fn find_current_for_hub(&self, hub_id: &HubId) -> Result<Option<Session>, DomainError> {
        let state = self.state.read().await;
        let current = state
            .order
            .iter()
            .rev()
            .filter_map(|id| state.sessions.get(id))
            .find(|s| s.hub_id() == hub_id)
            .cloned();
        Ok(current)
    }

    async fn find_by_ids(&self, ids: &[SessionId]) -> Result<Vec<Session>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let state = self.state.read().await;
        let mut found: Vec<Session> = ids
            .iter()
            .filter_map(|id| state.sessions.get(id).cloned())
            .collect();
        if found.is_empty() {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("None of {} sessions found", ids.len()),
            ));
        }
        found.sort_by_key(Session::ordering_key);
        found.dedup_by_key(|s| *s.id());
        Ok(found)
    }
}
