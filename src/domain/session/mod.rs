//! Session domain module.
//!
//! Intake session lifecycle: a session starts Active and may be closed once.
//! At most one session per hub is Active at any time; that invariant is
//! enforced by the application layer, not by this entity.

mod aggregate;

pub use aggregate::Session;
