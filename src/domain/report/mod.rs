//! Hub report domain module.
//!
//! - `window` - request value objects (`ReportWindow`, `PageRequest`)
//! - `entry` - read models returned to callers
//! - `assembly` - pure, deterministic join and pagination over hubs

mod assembly;
mod entry;
mod window;

pub use assembly::{assemble, referenced_hub_ids, referenced_session_ids};
pub use entry::{ReportEntry, SessionItems};
pub use window::{PageRequest, ReportWindow};
