//! Hub entity.
//!
//! A hub is a pickup point. It is registered once and never mutated or
//! deleted by the intake core; sessions reference it by id.

use crate::domain::foundation::{HubId, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Maximum length for a hub location label.
pub const MAX_LOCATION_LENGTH: usize = 200;

/// A pickup hub.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `location` is 1-200 characters after trimming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub {
    id: HubId,
    registered_at: Timestamp,
    location: String,
}

impl Hub {
    /// Registers a new hub.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the location is blank
    /// - `OutOfRange` if the location is too long
    pub fn register(
        id: HubId,
        location: impl Into<String>,
        registered_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let location = location.into().trim().to_string();
        Self::validate_location(&location)?;

        Ok(Self {
            id,
            registered_at,
            location,
        })
    }

    /// Reconstitute a hub from persistence (no validation).
    pub fn reconstitute(id: HubId, registered_at: Timestamp, location: String) -> Self {
        Self {
            id,
            registered_at,
            location,
        }
    }

    pub fn id(&self) -> &HubId {
        &self.id
    }

    pub fn registered_at(&self) -> &Timestamp {
        &self.registered_at
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Deterministic ordering key used by listings and reports.
    pub fn ordering_key(&self) -> (Timestamp, HubId) {
        (self.registered_at, self.id)
    }

    fn validate_location(location: &str) -> Result<(), ValidationError> {
        if location.is_empty() {
            return Err(ValidationError::empty_field("location"));
        }
        let len = location.chars().count();
        if len > MAX_LOCATION_LENGTH {
            return Err(ValidationError::out_of_range(
                "location",
                1,
                MAX_LOCATION_LENGTH as i64,
                len as i64,
            ));
        }
        Ok(())
    }
}
