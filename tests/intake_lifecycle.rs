//! Integration tests for the intake lifecycle.
//!
//! Drives `IntakeService` end to end over the in-memory adapters:
//! 1. Session open/close rules per hub
//! 2. Item registration and LIFO removal
//! 3. Report grouping, window filtering and paging
//! 4. Concurrent opens on one hub
//!
//! A `ManualClock` makes every timestamp explicit.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pickup_hub::adapters::{
    CountingObserver, InMemoryHubRepository, InMemoryItemRepository, InMemorySessionRepository,
    ManualClock,
};
use pickup_hub::application::{IntakePorts, IntakeService};
use pickup_hub::config::IntakeConfig;
use pickup_hub::domain::foundation::{
    DomainError, ErrorCode, HubId, ItemType, RequestContext, SessionId, SessionStatus, Timestamp,
};
use pickup_hub::domain::hub::Hub;
use pickup_hub::domain::session::Session;
use pickup_hub::domain::{ConflictKind, IntakeError, InvalidRangeKind, NotFoundKind};
use pickup_hub::ports::SessionRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    service: Arc<IntakeService>,
    clock: Arc<ManualClock>,
    sessions: InMemorySessionRepository,
    items: InMemoryItemRepository,
    counters: Arc<CountingObserver>,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(IntakeConfig {
            allowed_locations: vec![
                "Moscow".to_string(),
                "Saint Petersburg".to_string(),
                "Kazan".to_string(),
            ],
            ..IntakeConfig::default()
        })
    }

    fn with_config(config: IntakeConfig) -> Self {
        let sessions = InMemorySessionRepository::new();
        Self::build(config, sessions.clone(), Arc::new(sessions))
    }

    fn build(
        config: IntakeConfig,
        sessions: InMemorySessionRepository,
        session_port: Arc<dyn SessionRepository>,
    ) -> Self {
        let clock = Arc::new(ManualClock::starting_at(ts(0)));
        let items = InMemoryItemRepository::new();
        let counters = Arc::new(CountingObserver::new());
        let ports = IntakePorts {
            hubs: Arc::new(InMemoryHubRepository::new()),
            sessions: session_port,
            items: Arc::new(items.clone()),
            clock: clock.clone(),
            observer: counters.clone(),
        };
        Self {
            service: Arc::new(IntakeService::new(ports, &config)),
            clock,
            sessions,
            items,
            counters,
        }
    }

    fn at(&self, secs: i64) -> &IntakeService {
        self.clock.set(ts(secs));
        &self.service
    }

    async fn hub(&self, location: &str) -> Hub {
        self.service.create_hub(location, ctx()).await.unwrap()
    }
}

fn ts(secs: i64) -> Timestamp {
    Timestamp::from_unix_secs(secs)
}

fn ctx() -> RequestContext {
    RequestContext::new().with_source("integration-test")
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn open_twice_conflicts_and_creates_nothing() {
    let h = Harness::new();
    let hub = h.hub("Moscow").await;

    let s1 = h.at(1).open_session(*hub.id(), ctx()).await.unwrap();
    assert_eq!(s1.status(), SessionStatus::Active);

    let again = h.at(2).open_session(*hub.id(), ctx()).await;

    assert!(matches!(
        again,
        Err(IntakeError::Conflict(ConflictKind::SessionAlreadyOpen(id))) if id == *hub.id()
    ));
    assert_eq!(h.sessions.sessions_of(hub.id()).await, vec![s1]);
}

#[tokio::test]
async fn remove_last_deletes_the_newest_item() {
    let h = Harness::new();
    let hub = h.hub("Moscow").await;
    let session = h.at(1).open_session(*hub.id(), ctx()).await.unwrap();

    let p1 = h
        .at(10)
        .add_item(*hub.id(), ItemType::Electronics, ctx())
        .await
        .unwrap();
    let p2 = h
        .at(11)
        .add_item(*hub.id(), ItemType::Clothing, ctx())
        .await
        .unwrap();

    let removed = h.at(12).remove_last_item(*hub.id(), ctx()).await.unwrap();

    assert_eq!(removed, p2);
    assert_eq!(h.items.items_of(session.id()).await, vec![p1]);
}

#[tokio::test]
async fn add_after_close_conflicts() {
    let h = Harness::new();
    let hub = h.hub("Moscow").await;
    h.at(1).open_session(*hub.id(), ctx()).await.unwrap();
    h.at(10)
        .add_item(*hub.id(), ItemType::Electronics, ctx())
        .await
        .unwrap();

    let closed = h.at(20).close_session(*hub.id(), ctx()).await.unwrap();
    assert_eq!(closed.status(), SessionStatus::Closed);

    let result = h
        .at(21)
        .add_item(*hub.id(), ItemType::Electronics, ctx())
        .await;

    assert!(matches!(
        result,
        Err(IntakeError::Conflict(ConflictKind::NoActiveSession(_)))
    ));
}

#[tokio::test]
async fn report_groups_single_hub_session_and_item() {
    let h = Harness::new();
    let hub = h.hub("Moscow").await;
    let session = h.at(1).open_session(*hub.id(), ctx()).await.unwrap();
    let p1 = h
        .at(10)
        .add_item(*hub.id(), ItemType::Electronics, ctx())
        .await
        .unwrap();
    h.at(11)
        .add_item(*hub.id(), ItemType::Clothing, ctx())
        .await
        .unwrap();
    h.at(12).remove_last_item(*hub.id(), ctx()).await.unwrap();
    h.at(20).close_session(*hub.id(), ctx()).await.unwrap();

    let report = h
        .service
        .generate_report(ts(0), ts(100), 1, 10, ctx())
        .await
        .unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report[0].hub, hub);
    assert_eq!(report[0].sessions.len(), 1);
    assert_eq!(report[0].sessions[0].session.id(), session.id());
    assert_eq!(report[0].sessions[0].items, vec![p1]);
}

#[tokio::test]
async fn report_page_past_qualifying_hubs_is_invalid_range() {
    let h = Harness::new();
    let hub = h.hub("Moscow").await;
    h.at(1).open_session(*hub.id(), ctx()).await.unwrap();
    h.at(10)
        .add_item(*hub.id(), ItemType::Electronics, ctx())
        .await
        .unwrap();

    let result = h
        .service
        .generate_report(ts(0), ts(100), 2, 10, ctx())
        .await;

    assert!(matches!(
        result,
        Err(IntakeError::InvalidRange(InvalidRangeKind::PageOutOfRange {
            page: 2,
            limit: 10,
            available: 1
        }))
    ));
}

#[tokio::test]
async fn remove_last_on_empty_session_is_no_item() {
    let h = Harness::new();
    let hub = h.hub("Kazan").await;
    h.at(1).open_session(*hub.id(), ctx()).await.unwrap();

    let result = h.at(2).remove_last_item(*hub.id(), ctx()).await;

    assert!(matches!(
        result,
        Err(IntakeError::NotFound(NotFoundKind::NoItem(id))) if id == *hub.id()
    ));
}

// =============================================================================
// Lifecycle properties
// =============================================================================

#[tokio::test]
async fn open_close_open_always_succeeds() {
    let h = Harness::new();
    let hub = h.hub("Saint Petersburg").await;

    for round in 0..5 {
        let base = round * 10;
        let opened = h.at(base + 1).open_session(*hub.id(), ctx()).await.unwrap();
        let closed = h.at(base + 2).close_session(*hub.id(), ctx()).await.unwrap();
        assert_eq!(opened.id(), closed.id());
    }

    let history = h.sessions.sessions_of(hub.id()).await;
    assert_eq!(history.len(), 5);
    assert!(history.iter().all(|s| s.status() == SessionStatus::Closed));
}

#[tokio::test]
async fn close_without_history_then_after_close() {
    let h = Harness::new();
    let hub = h.hub("Moscow").await;

    let never = h.at(1).close_session(*hub.id(), ctx()).await;
    assert!(matches!(
        never,
        Err(IntakeError::NotFound(NotFoundKind::NoSessionEver(_)))
    ));

    h.at(2).open_session(*hub.id(), ctx()).await.unwrap();
    h.at(3).close_session(*hub.id(), ctx()).await.unwrap();
    let twice = h.at(4).close_session(*hub.id(), ctx()).await;
    assert!(matches!(
        twice,
        Err(IntakeError::Conflict(ConflictKind::NoActiveSession(_)))
    ));
}

#[tokio::test]
async fn clock_stepping_back_keeps_the_new_session_current() {
    let h = Harness::new();
    let hub = h.hub("Kazan").await;
    h.at(100).open_session(*hub.id(), ctx()).await.unwrap();
    h.at(110).close_session(*hub.id(), ctx()).await.unwrap();

    let reopened = h.at(50).open_session(*hub.id(), ctx()).await.unwrap();
    let item = h
        .at(51)
        .add_item(*hub.id(), ItemType::Clothing, ctx())
        .await
        .unwrap();

    assert_eq!(item.session_id(), reopened.id());
    assert!(matches!(
        h.at(52).open_session(*hub.id(), ctx()).await,
        Err(IntakeError::Conflict(ConflictKind::SessionAlreadyOpen(_)))
    ));
    let closed = h.at(53).close_session(*hub.id(), ctx()).await.unwrap();
    assert_eq!(closed.id(), reopened.id());
}

#[tokio::test]
async fn unknown_hub_is_not_found_everywhere() {
    let h = Harness::new();
    let ghost = HubId::new();

    let errors = vec![
        h.service.open_session(ghost, ctx()).await.unwrap_err(),
        h.service.close_session(ghost, ctx()).await.unwrap_err(),
        h.service
            .add_item(ghost, ItemType::Footwear, ctx())
            .await
            .unwrap_err(),
        h.service.remove_last_item(ghost, ctx()).await.unwrap_err(),
    ];

    for err in errors {
        assert_eq!(err.code(), ErrorCode::HubNotFound);
        assert!(err.is_client_error());
    }
}

#[tokio::test]
async fn same_second_items_remove_in_insert_order() {
    let h = Harness::new();
    let hub = h.hub("Moscow").await;
    h.at(1).open_session(*hub.id(), ctx()).await.unwrap();
    let svc = h.at(5);
    let first = svc.add_item(*hub.id(), ItemType::Electronics, ctx()).await.unwrap();
    let second = svc.add_item(*hub.id(), ItemType::Footwear, ctx()).await.unwrap();

    assert_eq!(svc.remove_last_item(*hub.id(), ctx()).await.unwrap(), second);
    assert_eq!(svc.remove_last_item(*hub.id(), ctx()).await.unwrap(), first);
    assert!(matches!(
        svc.remove_last_item(*hub.id(), ctx()).await,
        Err(IntakeError::NotFound(NotFoundKind::NoItem(_)))
    ));
}

#[tokio::test]
async fn report_lists_same_second_items_in_removal_order() {
    let h = Harness::new();
    let hub = h.hub("Moscow").await;
    h.at(1).open_session(*hub.id(), ctx()).await.unwrap();
    let svc = h.at(5);
    let mut added = Vec::new();
    for item_type in ItemType::ALL {
        added.push(svc.add_item(*hub.id(), item_type, ctx()).await.unwrap());
    }

    let report = svc.generate_report(ts(0), ts(10), 1, 10, ctx()).await.unwrap();
    assert_eq!(report[0].sessions[0].items, added);

    let removed = svc.remove_last_item(*hub.id(), ctx()).await.unwrap();
    assert_eq!(Some(&removed), added.last());
}

#[tokio::test]
async fn report_spans_hubs_in_registration_order_and_respects_window() {
    let h = Harness::new();
    let moscow = h.at(0).create_hub("Moscow", ctx()).await.unwrap();
    let kazan = h.at(1).create_hub("Kazan", ctx()).await.unwrap();
    let idle = h.at(2).create_hub("Saint Petersburg", ctx()).await.unwrap();

    h.at(10).open_session(*kazan.id(), ctx()).await.unwrap();
    h.at(11).add_item(*kazan.id(), ItemType::Clothing, ctx()).await.unwrap();
    h.at(12).open_session(*moscow.id(), ctx()).await.unwrap();
    h.at(13).add_item(*moscow.id(), ItemType::Footwear, ctx()).await.unwrap();
    h.at(500).add_item(*moscow.id(), ItemType::Footwear, ctx()).await.unwrap();
    h.at(14).open_session(*idle.id(), ctx()).await.unwrap();

    let report = h
        .service
        .generate_report(ts(11), ts(13), 1, 10, ctx())
        .await
        .unwrap();

    let locations: Vec<&str> = report.iter().map(|e| e.hub.location()).collect();
    assert_eq!(locations, vec!["Moscow", "Kazan"]);
    assert!(report
        .iter()
        .flat_map(|e| e.sessions.iter())
        .flat_map(|s| s.items.iter())
        .all(|i| !i.created_at().is_before(&ts(11)) && !i.created_at().is_after(&ts(13))));
    assert_eq!(report[0].item_count(), 1);

    let empty = h
        .service
        .generate_report(ts(200), ts(300), 1, 10, ctx())
        .await;
    assert!(matches!(
        empty,
        Err(IntakeError::NotFound(NotFoundKind::NoItemsInRange { .. }))
    ));
}

#[tokio::test]
async fn hubs_outside_allow_list_are_rejected_and_listing_pages() {
    let h = Harness::new();
    assert!(matches!(
        h.service.create_hub("Novosibirsk", ctx()).await,
        Err(IntakeError::Invalid(_))
    ));

    for (secs, location) in [(3, "Kazan"), (1, "Moscow"), (2, "Saint Petersburg")] {
        h.at(secs).create_hub(location, ctx()).await.unwrap();
    }

    let first = h.service.list_hubs(1, 2, ctx()).await.unwrap();
    let second = h.service.list_hubs(2, 2, ctx()).await.unwrap();
    let names: Vec<&str> = first
        .iter()
        .chain(second.iter())
        .map(Hub::location)
        .collect();
    assert_eq!(names, vec!["Moscow", "Saint Petersburg", "Kazan"]);
    assert!(matches!(
        h.service.list_hubs(3, 2, ctx()).await,
        Err(IntakeError::InvalidRange(_))
    ));
}

#[tokio::test]
async fn observer_sees_only_successful_mutations() {
    let h = Harness::new();
    let hub = h.hub("Moscow").await;
    h.at(1).open_session(*hub.id(), ctx()).await.unwrap();
    let _ = h.at(2).open_session(*hub.id(), ctx()).await;
    h.at(3).add_item(*hub.id(), ItemType::Clothing, ctx()).await.unwrap();
    h.at(4).add_item(*hub.id(), ItemType::Clothing, ctx()).await.unwrap();
    h.at(5).remove_last_item(*hub.id(), ctx()).await.unwrap();

    let counters = h.counters.snapshot();
    assert_eq!(counters.hubs_registered.get("Moscow"), Some(&1));
    assert_eq!(counters.sessions_opened.get(hub.id()), Some(&1));
    assert_eq!(counters.net_items(hub.id()), 1);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_opens_leave_one_active_session() {
    let h = Harness::new();
    let hub = h.hub("Moscow").await;

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let service = Arc::clone(&h.service);
        let hub_id = *hub.id();
        tasks.push(tokio::spawn(async move {
            service.open_session(hub_id, ctx()).await
        }));
    }

    let mut opened = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => opened += 1,
            Err(e) => assert!(matches!(
                e,
                IntakeError::Conflict(ConflictKind::SessionAlreadyOpen(_))
            )),
        }
    }

    assert_eq!(opened, 1);
    let active = h
        .sessions
        .sessions_of(hub.id())
        .await
        .into_iter()
        .filter(|s| s.is_active())
        .count();
    assert_eq!(active, 1);
}

/// Session store with no uniqueness check of its own. Lookups yield before
/// reading so concurrent callers interleave between check and save.
#[derive(Default)]
struct PermissiveSessionRepository {
    sessions: Mutex<Vec<Session>>,
}

#[async_trait]
impl SessionRepository for PermissiveSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        tokio::task::yield_now().await;
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn mark_closed(&self, id: &SessionId) -> Result<Session, DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| DomainError::new(ErrorCode::SessionNotFound, id.to_string()))?;
        session.close()?;
        Ok(session.clone())
    }

    async fn find_current_for_hub(&self, hub_id: &HubId) -> Result<Option<Session>, DomainError> {
        tokio::task::yield_now().await;
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

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn hub_lock_serializes_opens_when_storage_accepts_duplicates() {
    let store = Arc::new(PermissiveSessionRepository::default());
    let h = Harness::build(
        IntakeConfig::default(),
        InMemorySessionRepository::new(),
        store.clone(),
    );
    let hub = h.hub("Moscow").await;

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let service = Arc::clone(&h.service);
        let hub_id = *hub.id();
        tasks.push(tokio::spawn(async move {
            service.open_session(hub_id, ctx()).await
        }));
    }

    let mut opened = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            opened += 1;
        }
    }

    assert_eq!(opened, 1);
    assert_eq!(store.sessions.lock().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_removes_each_take_a_distinct_item() {
    let h = Harness::new();
    let hub = h.hub("Kazan").await;
    let session = h.at(1).open_session(*hub.id(), ctx()).await.unwrap();
    for secs in 10..18 {
        h.at(secs)
            .add_item(*hub.id(), ItemType::Electronics, ctx())
            .await
            .unwrap();
    }

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&h.service);
        let hub_id = *hub.id();
        tasks.push(tokio::spawn(async move {
            service.remove_last_item(hub_id, ctx()).await
        }));
    }

    let mut removed = Vec::new();
    for task in tasks {
        removed.push(task.await.unwrap().unwrap());
    }
    removed.sort_by_key(|i| *i.id());
    removed.dedup_by_key(|i| *i.id());

    assert_eq!(removed.len(), 8);
    assert!(h.items.items_of(session.id()).await.is_empty());
}
