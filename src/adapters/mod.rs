//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - in-memory repositories (tests, single process)
//! - `postgres` - PostgreSQL repositories, pool and migrations
//! - `observer` - business-event observers (counters, audit log)
//! - `clock` - system and manual clocks

mod clock;
pub mod memory;
pub mod observer;
pub mod postgres;

pub use clock::{ManualClock, SystemClock};
pub use memory::{InMemoryHubRepository, InMemoryItemRepository, InMemorySessionRepository};
pub use observer::{CountingObserver, FanoutObserver, IntakeCounters, NoopObserver, TracingObserver};
pub use postgres::{PostgresHubRepository, PostgresItemRepository, PostgresSessionRepository};
