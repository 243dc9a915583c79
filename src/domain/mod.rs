//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `hub` - Pickup hubs
//! - `session` - Intake session lifecycle
//! - `item` - Items registered during a session
//! - `report` - Time-windowed, paginated hub report
//! - `errors` - Use-case error taxonomy

pub mod errors;
pub mod foundation;
pub mod hub;
pub mod item;
pub mod report;
pub mod session;

pub use errors::{ConflictKind, IntakeError, InvalidRangeKind, NotFoundKind};
