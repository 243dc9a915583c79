//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the intake domain.

mod errors;
mod ids;
mod item_type;
mod request_context;
mod session_status;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{HubId, ItemId, SessionId};
pub use item_type::ItemType;
pub use request_context::RequestContext;
pub use session_status::SessionStatus;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
