//! Clock port - source of "now" for new sessions, items and hubs.

use crate::domain::foundation::Timestamp;

/// Supplies the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
