//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler owns its ports as `Arc<dyn ...>` and exposes a single `handle`.

pub mod hub;
pub mod item;
pub mod report;
pub mod session;

mod lookup;

#[cfg(test)]
pub(crate) mod test_support;

pub use hub::{CreateHubCommand, CreateHubHandler, ListHubsHandler, ListHubsQuery};
pub use item::{AddItemCommand, AddItemHandler, RemoveLastItemCommand, RemoveLastItemHandler};
pub use report::{GenerateReportHandler, GenerateReportQuery};
pub use session::{
    CloseSessionCommand, CloseSessionHandler, OpenSessionCommand, OpenSessionHandler,
};
