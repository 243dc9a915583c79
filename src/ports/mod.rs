//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the intake core and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `HubRepository` - Hub lookup and registration
//! - `SessionRepository` - Session creation, closing and lookup
//! - `ItemRepository` - Item registration, removal and range queries
//!
//! ## Ambient Ports
//!
//! - `Clock` - Current time
//! - `IntakeObserver` - Business-event callbacks (metrics, audit)

mod clock;
mod hub_repository;
mod intake_observer;
mod item_repository;
mod session_repository;

pub use clock::Clock;
pub use hub_repository::HubRepository;
pub use intake_observer::IntakeObserver;
pub use item_repository::ItemRepository;
pub use session_repository::SessionRepository;
