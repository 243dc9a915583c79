//! Counting observer - in-process business counters.
//!
//! Keeps per-location hub counts and per-hub session and item counts that a
//! metrics endpoint can export from a [`IntakeCounters`] snapshot.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::domain::foundation::HubId;
use crate::domain::hub::Hub;
use crate::domain::item::Item;
use crate::domain::session::Session;
use crate::ports::IntakeObserver;

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntakeCounters {
    pub hubs_registered: BTreeMap<String, u64>,
    pub sessions_opened: BTreeMap<HubId, u64>,
    pub sessions_closed: BTreeMap<HubId, u64>,
    pub items_added: BTreeMap<HubId, u64>,
    pub items_removed: BTreeMap<HubId, u64>,
}

impl IntakeCounters {
    /// Items currently registered at a hub according to the counters.
    pub fn net_items(&self, hub_id: &HubId) -> i64 {
        let added = self.items_added.get(hub_id).copied().unwrap_or(0);
        let removed = self.items_removed.get(hub_id).copied().unwrap_or(0);
        added as i64 - removed as i64
    }
}

/// Observer that increments counters on every notification.
#[derive(Debug, Default)]
pub struct CountingObserver {
    counters: Mutex<IntakeCounters>,
}

impl CountingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> IntakeCounters {
        self.counters().clone()
    }

    // A panic mid-increment cannot leave a counter half-written.
    fn counters(&self) -> MutexGuard<'_, IntakeCounters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn bump<K: Ord>(map: &mut BTreeMap<K, u64>, key: K) {
    *map.entry(key).or_insert(0) += 1;
}

impl IntakeObserver for CountingObserver {
    fn hub_registered(&self, hub: &Hub) {
        bump(&mut self.counters().hubs_registered, hub.location().to_string());
    }

    fn session_opened(&self, session: &Session) {
        bump(&mut self.counters().sessions_opened, *session.hub_id());
    }

    fn session_closed(&self, session: &Session) {
        bump(&mut self.counters().sessions_closed, *session.hub_id());
    }

    fn item_added(&self, hub: &Hub, _item: &Item) {
        bump(&mut self.counters().items_added, *hub.id());
    }

    fn item_removed(&self, hub: &Hub, _item: &Item) {
        bump(&mut self.counters().items_removed, *hub.id());
    }
}
