//! Intake business settings

use serde::Deserialize;

use super::error::ValidationError;

/// Hard ceiling for `max_page_limit`.
pub const PAGE_LIMIT_CEILING: u32 = 1000;

/// Settings consumed by the intake use cases.
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// Locations where hubs may be registered. Empty accepts any location.
    ///
    /// Read from a comma-separated env value, e.g.
    /// `PICKUP_HUB__INTAKE__ALLOWED_LOCATIONS=Moscow,Saint Petersburg,Kazan`.
    #[serde(default)]
    pub allowed_locations: Vec<String>,

    /// Largest `limit` a caller may request for report or hub pages.
    #[serde(default = "default_max_page_limit")]
    pub max_page_limit: u32,
}

impl IntakeConfig {
    /// Allowed locations with surrounding whitespace removed.
    pub fn locations(&self) -> Vec<String> {
        self.allowed_locations
            .iter()
            .map(|l| l.trim().to_string())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_page_limit == 0 || self.max_page_limit > PAGE_LIMIT_CEILING {
            return Err(ValidationError::InvalidPageLimit {
                max: PAGE_LIMIT_CEILING,
                actual: self.max_page_limit,
            });
        }
        if self.allowed_locations.iter().any(|l| l.trim().is_empty()) {
            return Err(ValidationError::BlankLocation);
        }
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            allowed_locations: Vec::new(),
            max_page_limit: default_max_page_limit(),
        }
    }
}

fn default_max_page_limit() -> u32 {
    100
}
