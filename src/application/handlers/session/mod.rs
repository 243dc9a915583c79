//! Session command handlers.

mod close_session;
mod open_session;

pub use close_session::{CloseSessionCommand, CloseSessionHandler};
pub use open_session::{OpenSessionCommand, OpenSessionHandler};
