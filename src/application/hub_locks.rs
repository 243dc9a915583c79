//! Per-hub mutual exclusion for check-then-act use cases.
//!
//! Opening, closing, adding and removing all read the hub's current session,
//! decide, then write. Running that sequence under the hub's lock keeps
//! "at most one active session per hub" and "remove exactly the newest item"
//! true for concurrent callers in this process. Different hubs never contend.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::HubId;

/// Registry of lazily created per-hub locks.
#[derive(Debug, Default)]
pub struct HubLocks {
    locks: Mutex<HashMap<HubId, Arc<Mutex<()>>>>,
}

/// Held for the duration of one use case; releases on drop.
pub type HubGuard = OwnedMutexGuard<()>;

impl HubLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until the caller holds the hub's lock.
    pub async fn acquire(&self, hub_id: HubId) -> HubGuard {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Entries nobody holds or waits on only cost memory.
            locks.retain(|id, lock| *id == hub_id || Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(hub_id).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of hubs with a live lock entry.
    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
