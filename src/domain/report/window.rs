//! Report request value objects: the time window and the page selector.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Inclusive time window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawReportWindow")]
pub struct ReportWindow {
    start: Timestamp,
    end: Timestamp,
}

impl ReportWindow {
    /// # Errors
    ///
    /// - `InvalidFormat("window")` if `start` is after `end`
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        if start.is_after(&end) {
            return Err(ValidationError::invalid_format(
                "window",
                format!("start {} is after end {}", start, end),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> &Timestamp {
        &self.start
    }

    pub fn end(&self) -> &Timestamp {
        &self.end
    }

    /// True when `ts` lies inside the window, both ends included.
    pub fn contains(&self, ts: &Timestamp) -> bool {
        !ts.is_before(&self.start) && !ts.is_after(&self.end)
    }
}

#[derive(Deserialize)]
struct RawReportWindow {
    start: Timestamp,
    end: Timestamp,
}

impl TryFrom<RawReportWindow> for ReportWindow {
    type Error = ValidationError;

    fn try_from(raw: RawReportWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

/// One-based page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// # Errors
    ///
    /// - `OutOfRange("page")` if `page < 1`
    /// - `OutOfRange("limit")` if `limit` is outside `1..=max_limit`
    pub fn new(page: u32, limit: u32, max_limit: u32) -> Result<Self, ValidationError> {
        if page < 1 {
            return Err(ValidationError::out_of_range(
                "page",
                1,
                i64::from(u32::MAX),
                i64::from(page),
            ));
        }
        if limit < 1 || limit > max_limit {
            return Err(ValidationError::out_of_range(
                "limit",
                1,
                i64::from(max_limit),
                i64::from(limit),
            ));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of entries skipped before this page: `(page - 1) * limit`.
    pub fn offset(&self) -> usize {
        (self.page as usize)
            .saturating_sub(1)
            .saturating_mul(self.limit as usize)
    }

    /// Slice bounds of this page over `total` entries.
    ///
    /// Returns `None` when the offset lies past `total`. An offset exactly
    /// equal to `total` yields an empty page.
    pub fn bounds(&self, total: usize) -> Option<(usize, usize)> {
        let start = self.offset();
        if start > total {
            return None;
        }
        let end = start.saturating_add(self.limit as usize).min(total);
        Some((start, end))
    }
}

/// Wire shape of a page selector. The service-level ceiling is applied by
/// the caller, so deserialization only enforces the lower bounds.
#[derive(Deserialize)]
struct RawPageRequest {
    page: u32,
    limit: u32,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = ValidationError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.limit, u32::MAX)
    }
}
