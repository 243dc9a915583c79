//! Item command handlers.

mod add_item;
mod remove_last_item;

pub use add_item::{AddItemCommand, AddItemHandler};
pub use remove_last_item::{RemoveLastItemCommand, RemoveLastItemHandler};
