//! Use-case error taxonomy.
//!
//! Every handler returns [`IntakeError`]. Collaborator failures arrive as
//! [`DomainError`]; each handler maps the sentinels it understands to exactly
//! one kind below and wraps everything else as `Upstream`.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, HubId, Timestamp, ValidationError};

/// A referenced entity, or any match for a query, does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundKind {
    #[error("hub {0} does not exist")]
    Hub(HubId),

    #[error("hub {0} has never had an intake session")]
    NoSessionEver(HubId),

    #[error("current session of hub {0} has no items")]
    NoItem(HubId),

    #[error("no items registered between {start} and {end}")]
    NoItemsInRange { start: Timestamp, end: Timestamp },
}

/// The operation would violate the session lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictKind {
    #[error("hub {0} already has an active session")]
    SessionAlreadyOpen(HubId),

    #[error("hub {0} has no active session")]
    NoActiveSession(HubId),
}

/// The caller-supplied pagination window exceeds available data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRangeKind {
    #[error("page {page} with limit {limit} starts past the {available} available hubs")]
    PageOutOfRange {
        page: u32,
        limit: u32,
        available: usize,
    },
}

/// Error returned by every intake use case.
#[derive(Debug, Clone, Error)]
pub enum IntakeError {
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundKind),

    #[error("conflict: {0}")]
    Conflict(#[from] ConflictKind),

    #[error("invalid range: {0}")]
    InvalidRange(#[from] InvalidRangeKind),

    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),

    /// A collaborator failed for reasons opaque to the core. Not retried here.
    #[error("{operation} failed ({context}): {source}")]
    Upstream {
        operation: &'static str,
        context: String,
        #[source]
        source: DomainError,
    },
}

impl IntakeError {
    /// Wraps a collaborator failure with the operation and the entity it targeted.
    pub fn upstream(
        operation: &'static str,
        context: impl std::fmt::Display,
        source: DomainError,
    ) -> Self {
        IntakeError::Upstream {
            operation,
            context: context.to_string(),
            source,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            IntakeError::NotFound(NotFoundKind::Hub(_)) => ErrorCode::HubNotFound,
            IntakeError::NotFound(NotFoundKind::NoSessionEver(_)) => ErrorCode::SessionNotFound,
            IntakeError::NotFound(NotFoundKind::NoItem(_)) => ErrorCode::ItemNotFound,
            IntakeError::NotFound(NotFoundKind::NoItemsInRange { .. }) => ErrorCode::ItemsNotFound,
            IntakeError::Conflict(ConflictKind::SessionAlreadyOpen(_)) => {
                ErrorCode::ActiveSessionExists
            }
            IntakeError::Conflict(ConflictKind::NoActiveSession(_)) => ErrorCode::NoActiveSession,
            IntakeError::InvalidRange(_) => ErrorCode::PageOutOfRange,
            IntakeError::Invalid(_) => ErrorCode::ValidationFailed,
            IntakeError::Upstream { .. } => ErrorCode::InternalError,
        }
    }

    /// True when the caller can fix the request; false for internal failures.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, IntakeError::Upstream { .. })
    }
}
