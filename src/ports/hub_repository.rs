//! Hub repository port.
//!
//! Hubs are written once and read many times: by id when a use case targets
//! a hub, and in bulk when the report resolves the hubs owning its sessions.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, HubId};
use crate::domain::hub::Hub;

/// Repository port for hub persistence.
#[async_trait]
pub trait HubRepository: Send + Sync {
    /// Persist a newly registered hub.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, hub: &Hub) -> Result<(), DomainError>;

    /// Find a hub by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &HubId) -> Result<Option<Hub>, DomainError>;

    /// Fetch every hub whose id is in `ids`.
    ///
    /// Unknown ids are skipped. Empty input returns an empty vector.
    async fn find_by_ids(&self, ids: &[HubId]) -> Result<Vec<Hub>, DomainError>;

    /// List all hubs ordered by `(registered_at, id)`.
    async fn list(&self) -> Result<Vec<Hub>, DomainError>;
}
