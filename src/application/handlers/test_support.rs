//! Hand-rolled port doubles shared by the handler unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::HubLocks;
use crate::domain::foundation::{DomainError, ErrorCode, HubId, ItemId, SessionId, Timestamp};
use crate::domain::hub::Hub;
use crate::domain::item::Item;
use crate::domain::session::Session;
use crate::ports::{Clock, HubRepository, IntakeObserver, ItemRepository, SessionRepository};

fn simulated(what: &str) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Simulated {} failure", what))
}

pub(crate) fn ts(secs: i64) -> Timestamp {
    Timestamp::from_unix_secs(secs)
}

pub(crate) fn hub_at(secs: i64, location: &str) -> Hub {
    Hub::reconstitute(HubId::new(), ts(secs), location.to_string())
}

// ════════════════════════════════════════════════════════════════════════════
// Hubs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub(crate) struct MockHubRepository {
    hubs: Mutex<Vec<Hub>>,
    fail: bool,
}

impl MockHubRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(hubs: Vec<Hub>) -> Self {
        Self {
            hubs: Mutex::new(hubs),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            hubs: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn saved(&self) -> Vec<Hub> {
        self.hubs.lock().unwrap().clone()
    }
}

#[async_trait]
impl HubRepository for MockHubRepository {
    async fn save(&self, hub: &Hub) -> Result<(), DomainError> {
        if self.fail {
            return Err(simulated("hub save"));
        }
        self.hubs.lock().unwrap().push(hub.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &HubId) -> Result<Option<Hub>, DomainError> {
        if self.fail {
            return Err(simulated("hub lookup"));
        }
        Ok(self.hubs.lock().unwrap().iter().find(|h| h.id() == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[HubId]) -> Result<Vec<Hub>, DomainError> {
        if self.fail {
            return Err(simulated("hub lookup"));
        }
        Ok(self
            .hubs
            .lock()
            .unwrap()
            .iter()
            .filter(|h| ids.contains(h.id()))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Hub>, DomainError> {
        if self.fail {
            return Err(simulated("hub list"));
        }
        Ok(self.hubs.lock().unwrap().clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Sessions
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub(crate) struct MockSessionRepository {
    sessions: Mutex<Vec<Session>>,
    fail: bool,
    conflict_on_save: bool,
}

impl MockSessionRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(sessions: Vec<Session>) -> Self {
        Self {
            sessions: Mutex::new(sessions),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Reports a unique-index violation on save, as a concurrent writer would.
    pub(crate) fn conflicting() -> Self {
        Self {
            conflict_on_save: true,
            ..Self::default()
        }
    }

    pub(crate) fn saved(&self) -> Vec<Session> {
        self.sessions.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        if self.fail {
            return Err(simulated("session save"));
        }
        if self.conflict_on_save {
            return Err(DomainError::new(
                ErrorCode::ActiveSessionExists,
                "Simulated unique violation",
            ));
        }
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn mark_closed(&self, id: &SessionId) -> Result<Session, DomainError> {
        if self.fail {
            return Err(simulated("session close"));
        }
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| DomainError::new(ErrorCode::SessionNotFound, "no such session"))?;
        let _ = session.close();
        Ok(session.clone())
    }

    async fn find_current_for_hub(&self, hub_id: &HubId) -> Result<Option<Session>, DomainError> {
        if self.fail {
            return Err(simulated("session lookup"));
        }
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|s| s.hub_id() == hub_id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[SessionId]) -> Result<Vec<Session>, DomainError> {
        if self.fail {
            return Err(simulated("session lookup"));
        }
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| ids.contains(s.id()))
            .cloned()
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Items
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub(crate) struct MockItemRepository {
    items: Mutex<Vec<Item>>,
    fail: bool,
    lose_deletes: bool,
}

impl MockItemRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Finds items but reports every delete as matching no rows.
    pub(crate) fn losing_deletes(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            lose_deletes: true,
            ..Self::default()
        }
    }

    pub(crate) fn saved(&self) -> Vec<Item> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItemRepository for MockItemRepository {
    async fn save(&self, item: &Item) -> Result<(), DomainError> {
        if self.fail {
            return Err(simulated("item save"));
        }
        self.items.lock().unwrap().push(item.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: &ItemId) -> Result<(), DomainError> {
        if self.fail {
            return Err(simulated("item delete"));
        }
        if self.lose_deletes {
            return Err(DomainError::new(ErrorCode::ItemNotFound, "no rows deleted"));
        }
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.id() != id);
        if items.len() == before {
            return Err(DomainError::new(ErrorCode::ItemNotFound, "no rows deleted"));
        }
        Ok(())
    }

    async fn find_most_recent_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Item>, DomainError> {
        if self.fail {
            return Err(simulated("item lookup"));
        }
        // Later inserts win ties: max_by_key keeps the last maximum.
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.session_id() == session_id)
            .max_by_key(|i| *i.created_at())
            .cloned())
    }

    async fn find_in_time_range(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<Vec<Item>, DomainError> {
        if self.fail {
            return Err(simulated("item range"));
        }
        let mut found: Vec<Item> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| !i.created_at().is_before(start) && !i.created_at().is_after(end))
            .cloned()
            .collect();
        found.sort_by_key(|i| *i.created_at());
        Ok(found)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Clock and observer
// ════════════════════════════════════════════════════════════════════════════

pub(crate) struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

#[derive(Default)]
pub(crate) struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl IntakeObserver for RecordingObserver {
    fn hub_registered(&self, hub: &Hub) {
        self.record(format!("hub_registered:{}", hub.location()));
    }

    fn session_opened(&self, session: &Session) {
        self.record(format!("session_opened:{}", session.hub_id()));
    }

    fn session_closed(&self, session: &Session) {
        self.record(format!("session_closed:{}", session.hub_id()));
    }

    fn item_added(&self, hub: &Hub, item: &Item) {
        self.record(format!("item_added:{}:{}", hub.id(), item.item_type()));
    }

    fn item_removed(&self, hub: &Hub, item: &Item) {
        self.record(format!("item_removed:{}:{}", hub.id(), item.item_type()));
    }
}

pub(crate) fn locks() -> Arc<HubLocks> {
    Arc::new(HubLocks::new())
}

// ════════════════════════════════════════════════════════════════════════════
// Spans
// ════════════════════════════════════════════════════════════════════════════

/// Layer recording the fields every new span is created with.
#[derive(Clone, Default)]
pub(crate) struct SpanFieldRecorder {
    fields: Arc<Mutex<Vec<(String, String)>>>,
}

impl SpanFieldRecorder {
    pub(crate) fn field(&self, name: &str) -> Option<String> {
        self.fields
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

struct FieldVisitor<'a>(&'a mut Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{:?}", value)));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for SpanFieldRecorder {
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut fields = self.fields.lock().unwrap();
        attrs.record(&mut FieldVisitor(&mut fields));
    }
}
