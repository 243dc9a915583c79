//! Clock adapters.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{SubsecRound, Utc};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall-clock time in UTC, truncated to the microsecond precision of
/// `timestamptz` so stored rows compare equal to the returned entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_datetime(Utc::now().trunc_subsecs(6))
    }
}

/// Hand-driven clock with one-second resolution, for tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: AtomicI64,
}

impl ManualClock {
    pub fn starting_at(ts: Timestamp) -> Self {
        Self {
            secs: AtomicI64::new(ts.as_unix_secs()),
        }
    }

    pub fn set(&self, ts: Timestamp) {
        self.secs.store(ts.as_unix_secs(), Ordering::SeqCst);
    }

    /// Moves time forward and returns the new instant.
    pub fn advance(&self, secs: i64) -> Timestamp {
        let now = self.secs.fetch_add(secs, Ordering::SeqCst) + secs;
        Timestamp::from_unix_secs(now)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_unix_secs(self.secs.load(Ordering::SeqCst))
    }
}
