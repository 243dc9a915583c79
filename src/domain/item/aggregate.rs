//! Item entity - a single unit registered during an intake session.

use crate::domain::foundation::{ItemId, ItemType, SessionId, Timestamp};
use serde::{Deserialize, Serialize};

/// Registered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    session_id: SessionId,
    item_type: ItemType,
    created_at: Timestamp,
}

impl Item {
    /// Register a new item against a session.
    pub fn register(
        id: ItemId,
        session_id: SessionId,
        item_type: ItemType,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            item_type,
            created_at,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
