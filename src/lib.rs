//! Pickup Hub - intake sessions and reporting for a network of pickup hubs
//!
//! Operators open an intake session at a hub, register items into it, may
//! undo the most recent registration, and close the session. A report groups
//! the items created in a time window under their sessions and hubs.
//!
//! Layout follows ports and adapters: `domain` holds the rules, `ports` the
//! collaborator traits, `application` the use-case handlers and
//! [`application::IntakeService`], and `adapters` the in-memory and
//! PostgreSQL implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
