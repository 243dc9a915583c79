//! Item repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ItemId, SessionId, Timestamp};
use crate::domain::item::Item;

/// Repository port for item persistence.
///
/// Implementations must give every stored item a monotonically increasing
/// insertion sequence so that "most recent" is total even when two items
/// share a creation timestamp.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a newly registered item.
    async fn save(&self, item: &Item) -> Result<(), DomainError>;

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if no row was deleted
    /// - `DatabaseError` on persistence failure
    async fn delete_by_id(&self, id: &ItemId) -> Result<(), DomainError>;

    /// Find the item of a session with the greatest creation timestamp.
    ///
    /// Ties are broken by insertion sequence: the later insert wins.
    /// Returns `None` if the session owns no items.
    async fn find_most_recent_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Item>, DomainError>;

    /// Fetch every item created within `[start, end]`, both ends inclusive.
    ///
    /// Items come back in creation order: `created_at` ascending, ties in
    /// insertion order.
    async fn find_in_time_range(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<Vec<Item>, DomainError>;
}
