//! Hub domain module.
//!
//! Pickup hubs own zero or more intake sessions.

mod aggregate;

pub use aggregate::{Hub, MAX_LOCATION_LENGTH};
