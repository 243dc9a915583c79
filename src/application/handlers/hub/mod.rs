//! Hub command and query handlers.

mod create_hub;
mod list_hubs;

pub use create_hub::{CreateHubCommand, CreateHubHandler};
pub use list_hubs::{ListHubsHandler, ListHubsQuery};
