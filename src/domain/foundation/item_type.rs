//! ItemType - the constrained vocabulary of item categories accepted at intake.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Category of an item registered during an intake session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Electronics,
    Clothing,
    Footwear,
}

impl ItemType {
    /// All accepted categories.
    pub const ALL: [ItemType; 3] = [ItemType::Electronics, ItemType::Clothing, ItemType::Footwear];

    /// Storage and wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Electronics => "electronics",
            ItemType::Clothing => "clothing",
            ItemType::Footwear => "footwear",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("item_type"));
        }
        ItemType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::not_allowed("item_type", trimmed))
    }
}
