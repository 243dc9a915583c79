//! Pure join of hubs, sessions and items into paginated report entries.
//!
//! All grouping goes through ordered maps and every level is sorted before
//! slicing, so the page does not depend on the order hubs and sessions were
//! returned in:
//!
//! - hubs by `(registered_at, id)`
//! - sessions by `(started_at, id)`
//! - items by `created_at`, stable, so same-instant items keep the creation
//!   order the item store returned them in (the same order LIFO removal uses)

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::errors::InvalidRangeKind;
use crate::domain::foundation::{HubId, SessionId};
use crate::domain::hub::Hub;
use crate::domain::item::Item;
use crate::domain::session::Session;

use super::{PageRequest, ReportEntry, SessionItems};

/// Distinct session ids referenced by `items`, ascending.
pub fn referenced_session_ids(items: &[Item]) -> Vec<SessionId> {
    items
        .iter()
        .map(|item| *item.session_id())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct hub ids owning `sessions`, ascending.
pub fn referenced_hub_ids(sessions: &[Session]) -> Vec<HubId> {
    sessions
        .iter()
        .map(|session| *session.hub_id())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Groups items under sessions and sessions under hubs, then cuts one page
/// out of the qualifying hubs.
///
/// A hub qualifies only if at least one of its sessions owns at least one of
/// `items`; sessions without items and hubs without sessions are dropped.
///
/// # Errors
///
/// - `PageOutOfRange` if the page offset lies past the qualifying hub count
pub fn assemble(
    hubs: Vec<Hub>,
    sessions: Vec<Session>,
    items: Vec<Item>,
    page: &PageRequest,
) -> Result<Vec<ReportEntry>, InvalidRangeKind> {
    let mut items_by_session: BTreeMap<SessionId, Vec<Item>> = BTreeMap::new();
    for item in items {
        items_by_session
            .entry(*item.session_id())
            .or_default()
            .push(item);
    }
    for group in items_by_session.values_mut() {
        group.sort_by_key(|item| *item.created_at());
    }

    let mut sessions_by_hub: BTreeMap<HubId, Vec<Session>> = BTreeMap::new();
    let mut seen_sessions = BTreeSet::new();
    for session in sessions {
        if !items_by_session.contains_key(session.id()) || !seen_sessions.insert(*session.id()) {
            continue;
        }
        sessions_by_hub
            .entry(*session.hub_id())
            .or_default()
            .push(session);
    }
    for group in sessions_by_hub.values_mut() {
        group.sort_by_key(Session::ordering_key);
    }

    let mut qualifying: Vec<Hub> = hubs
        .into_iter()
        .filter(|hub| sessions_by_hub.contains_key(hub.id()))
        .collect();
    qualifying.sort_by_key(Hub::ordering_key);
    qualifying.dedup_by(|a, b| a.id() == b.id());

    let available = qualifying.len();
    let (start, end) = page
        .bounds(available)
        .ok_or(InvalidRangeKind::PageOutOfRange {
            page: page.page(),
            limit: page.limit(),
            available,
        })?;

    let mut entries = Vec::with_capacity(end - start);
    for hub in qualifying.into_iter().skip(start).take(end - start) {
        let mut session_items = Vec::new();
        for session in sessions_by_hub.remove(hub.id()).unwrap_or_default() {
            let items = items_by_session.remove(session.id()).unwrap_or_default();
            session_items.push(SessionItems { session, items });
        }
        entries.push(ReportEntry {
            hub,
            sessions: session_items,
        });
    }

    Ok(entries)
}
