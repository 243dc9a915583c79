//! Report entry read models.

use serde::{Deserialize, Serialize};

use crate::domain::hub::Hub;
use crate::domain::item::Item;
use crate::domain::session::Session;

/// One session of a report entry with its in-window items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionItems {
    pub session: Session,
    pub items: Vec<Item>,
}

/// One hub with the sessions that captured items inside the report window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub hub: Hub,
    pub sessions: Vec<SessionItems>,
}

impl ReportEntry {
    /// Total number of items across every session of this entry.
    pub fn item_count(&self) -> usize {
        self.sessions.iter().map(|s| s.items.len()).sum()
    }
}
