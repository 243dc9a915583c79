//! Lookups shared by the hub-scoped handlers.
//!
//! Each helper maps the absence it detects to exactly one `IntakeError` kind
//! and wraps repository failures as `Upstream`.

use crate::domain::foundation::HubId;
use crate::domain::hub::Hub;
use crate::domain::session::Session;
use crate::domain::{ConflictKind, IntakeError, NotFoundKind};
use crate::ports::{HubRepository, SessionRepository};

/// Loads the hub or fails with `NotFound(Hub)`.
pub(crate) async fn require_hub(
    hubs: &dyn HubRepository,
    hub_id: &HubId,
) -> Result<Hub, IntakeError> {
    hubs.find_by_id(hub_id)
        .await
        .map_err(|e| IntakeError::upstream("find_hub", format!("hub {}", hub_id), e))?
        .ok_or_else(|| NotFoundKind::Hub(*hub_id).into())
}

/// Loads the hub's most recently created session, whatever its status.
///
/// Fails with `NotFound(NoSessionEver)` if the hub never had one.
pub(crate) async fn require_current_session(
    sessions: &dyn SessionRepository,
    hub_id: &HubId,
) -> Result<Session, IntakeError> {
    sessions
        .find_current_for_hub(hub_id)
        .await
        .map_err(|e| IntakeError::upstream("find_current_session", format!("hub {}", hub_id), e))?
        .ok_or_else(|| NotFoundKind::NoSessionEver(*hub_id).into())
}

/// Loads the hub's current session and insists it is still active.
pub(crate) async fn require_active_session(
    sessions: &dyn SessionRepository,
    hub_id: &HubId,
) -> Result<Session, IntakeError> {
    let session = require_current_session(sessions, hub_id).await?;
    if !session.is_active() {
        return Err(ConflictKind::NoActiveSession(*hub_id).into());
    }
    Ok(session)
}

/// Logs a failed use case at a level matching who has to act on it.
pub(crate) fn record_failure(err: &IntakeError) {
    if err.is_client_error() {
        tracing::warn!(code = %err.code(), error = %err, "intake request rejected");
    } else {
        tracing::error!(code = %err.code(), error = %err, "intake request failed");
    }
}
