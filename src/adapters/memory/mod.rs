//! In-memory repository adapters.
//!
//! Used by tests and single-process deployments. Each repository holds its
//! state behind `Arc<tokio::sync::RwLock<..>>`, so clones share data.

mod hub_repository;
mod item_repository;
mod session_repository;

pub use hub_repository::InMemoryHubRepository;
pub use item_repository::InMemoryItemRepository;
pub use session_repository::InMemorySessionRepository;
