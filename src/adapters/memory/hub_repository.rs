//! In-memory HubRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, HubId};
use crate::domain::hub::Hub;
use crate::ports::HubRepository;

/// Hub store backed by a `HashMap`. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHubRepository {
    hubs: Arc<RwLock<HashMap<HubId, Hub>>>,
}

impl InMemoryHubRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored hubs.
    pub async fn len(&self) -> usize {
        self.hubs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.hubs.read().await.is_empty()
    }
}

#[async_trait]
impl HubRepository for InMemoryHubRepository {
    async fn save(&self, hub: &Hub) -> Result<(), DomainError> {
        let mut hubs = self.hubs.write().await;
        if hubs.contains_key(hub.id()) {
            return Err(DomainError::database(format!("Duplicate hub id: {}", hub.id())));
        }
        hubs.insert(*hub.id(), hub.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &HubId) -> Result<Option<Hub>, DomainError> {
        Ok(self.hubs.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[HubId]) -> Result<Vec<Hub>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let hubs = self.hubs.read().await;
        let mut found: Vec<Hub> = ids.iter().filter_map(|id| hubs.get(id).cloned()).collect();
        found.sort_by_key(Hub::ordering_key);
        found.dedup_by_key(|h| *h.id());
        Ok(found)
    }

    async fn list(&self) -> Result<Vec<Hub>, DomainError> {
        let mut all: Vec<Hub> = self.hubs.read().await.values().cloned().collect();
        all.sort_by_key(Hub::ordering_key);
        Ok(all)
    }
}
