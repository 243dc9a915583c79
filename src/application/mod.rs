//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Write handlers run under a per-hub lock; the report and hub listing are
//! lock-free reads. `IntakeService` bundles every handler behind one facade.

pub mod handlers;
mod hub_locks;
mod service;

pub use handlers::{
    // Hub handlers
    CreateHubCommand, CreateHubHandler, ListHubsHandler, ListHubsQuery,
    // Item handlers
    AddItemCommand, AddItemHandler, RemoveLastItemCommand, RemoveLastItemHandler,
    // Report handlers
    GenerateReportHandler, GenerateReportQuery,
    // Session handlers
    CloseSessionCommand, CloseSessionHandler, OpenSessionCommand, OpenSessionHandler,
};
pub use hub_locks::{HubGuard, HubLocks};
pub use service::{IntakePorts, IntakeService};
