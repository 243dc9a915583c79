//! In-memory ItemRepository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ItemId, SessionId, Timestamp};
use crate::domain::item::Item;
use crate::ports::ItemRepository;

#[derive(Debug, Default)]
struct State {
    /// `(insertion sequence, item)`, sequence strictly increasing.
    rows: Vec<(u64, Item)>,
    next_seq: u64,
}

/// Item store backed by an append-only vector. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items of a session in insertion order.
    pub async fn items_of(&self, session_id: &SessionId) -> Vec<Item> {
        self.state
            .read()
            .await
            .rows
            .iter()
            .filter(|(_, item)| item.session_id() == session_id)
            .map(|(_, item)| item.clone())
            .collect()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn save(&self, item: &Item) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.rows.iter().any(|(_, i)| i.id() == item.id()) {
            return Err(DomainError::database(format!("Duplicate item id: {}", item.id())));
        }
        let seq = state.next_seq;
        state.next_seq += 1;
        state.rows.push((seq, item.clone()));
        Ok(())
    }

    async fn delete_by_id(&self, id: &ItemId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let before = state.rows.len();
        state.rows.retain(|(_, item)| item.id() != id);
        if state.rows.len() == before {
            return Err(DomainError::new(
                ErrorCode::ItemNotFound,
                format!("Item not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn find_most_recent_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Item>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .iter()
            .filter(|(_, item)| item.session_id() == session_id)
            .max_by_key(|(seq, item)| (*item.created_at(), *seq))
            .map(|(_, item)| item.clone()))
    }

    async fn find_in_time_range(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<Vec<Item>, DomainError> {
        let state = self.state.read().await;
        // Rows are kept in insertion order; the stable sort preserves it for ties.
        let mut found: Vec<Item> = state
            .rows
            .iter()
            .map(|(_, item)| item)
            .filter(|item| !item.created_at().is_before(start) && !item.created_at().is_after(end))
            .cloned()
            .collect();
        found.sort_by_key(|item| *item.created_at());
        Ok(found)
    }
}
