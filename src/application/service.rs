//! IntakeService - the single entry point for transports.
//!
//! Wires every handler to one set of ports and one `HubLocks` registry, and
//! performs the caller-side checks (window order, page bounds) before a
//! handler runs.

use std::sync::Arc;

use crate::config::IntakeConfig;
use crate::domain::foundation::{HubId, ItemType, RequestContext, Timestamp};
use crate::domain::hub::Hub;
use crate::domain::item::Item;
use crate::domain::report::{PageRequest, ReportEntry, ReportWindow};
use crate::domain::session::Session;
use crate::domain::IntakeError;
use crate::ports::{Clock, HubRepository, IntakeObserver, ItemRepository, SessionRepository};

use super::handlers::{
    AddItemCommand, AddItemHandler, CloseSessionCommand, CloseSessionHandler, CreateHubCommand,
    CreateHubHandler, GenerateReportHandler, GenerateReportQuery, ListHubsHandler, ListHubsQuery,
    OpenSessionCommand, OpenSessionHandler, RemoveLastItemCommand, RemoveLastItemHandler,
};
use super::HubLocks;

/// The collaborators an `IntakeService` runs against.
#[derive(Clone)]
pub struct IntakePorts {
    pub hubs: Arc<dyn HubRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub clock: Arc<dyn Clock>,
    pub observer: Arc<dyn IntakeObserver>,
}

/// Facade over the intake handlers.
pub struct IntakeService {
    create_hub: CreateHubHandler,
    list_hubs: ListHubsHandler,
    open_session: OpenSessionHandler,
    close_session: CloseSessionHandler,
    add_item: AddItemHandler,
    remove_last_item: RemoveLastItemHandler,
    generate_report: GenerateReportHandler,
    max_page_limit: u32,
}

impl IntakeService {
    pub fn new(ports: IntakePorts, config: &IntakeConfig) -> Self {
        let locks = Arc::new(HubLocks::new());
        let IntakePorts {
            hubs,
            sessions,
            items,
            clock,
            observer,
        } = ports;

        Self {
            create_hub: CreateHubHandler::new(
                hubs.clone(),
                clock.clone(),
                observer.clone(),
                config.locations(),
            ),
            list_hubs: ListHubsHandler::new(hubs.clone()),
            open_session: OpenSessionHandler::new(
                hubs.clone(),
                sessions.clone(),
                clock.clone(),
                observer.clone(),
                locks.clone(),
            ),
            close_session: CloseSessionHandler::new(
                hubs.clone(),
                sessions.clone(),
                observer.clone(),
                locks.clone(),
            ),
            add_item: AddItemHandler::new(
                hubs.clone(),
                sessions.clone(),
                items.clone(),
                clock,
                observer.clone(),
                locks.clone(),
            ),
            remove_last_item: RemoveLastItemHandler::new(
                hubs.clone(),
                sessions.clone(),
                items.clone(),
                observer,
                locks,
            ),
            generate_report: GenerateReportHandler::new(hubs, sessions, items),
            max_page_limit: config.max_page_limit,
        }
    }

    pub async fn create_hub(
        &self,
        location: impl Into<String>,
        ctx: RequestContext,
    ) -> Result<Hub, IntakeError> {
        let cmd = CreateHubCommand {
            location: location.into(),
        };
        self.create_hub.handle(cmd, ctx).await
    }

    pub async fn list_hubs(
        &self,
        page: u32,
        limit: u32,
        ctx: RequestContext,
    ) -> Result<Vec<Hub>, IntakeError> {
        let page = PageRequest::new(page, limit, self.max_page_limit)?;
        self.list_hubs.handle(ListHubsQuery { page }, ctx).await
    }

    pub async fn open_session(
        &self,
        hub_id: HubId,
        ctx: RequestContext,
    ) -> Result<Session, IntakeError> {
        self.open_session
            .handle(OpenSessionCommand { hub_id }, ctx)
            .await
    }

    pub async fn close_session(
        &self,
        hub_id: HubId,
        ctx: RequestContext,
    ) -> Result<Session, IntakeError> {
        self.close_session
            .handle(CloseSessionCommand { hub_id }, ctx)
            .await
    }

    pub async fn add_item(
        &self,
        hub_id: HubId,
        item_type: ItemType,
        ctx: RequestContext,
    ) -> Result<Item, IntakeError> {
        self.add_item
            .handle(AddItemCommand { hub_id, item_type }, ctx)
            .await
    }

    pub async fn remove_last_item(
        &self,
        hub_id: HubId,
        ctx: RequestContext,
    ) -> Result<Item, IntakeError> {
        self.remove_last_item
            .handle(RemoveLastItemCommand { hub_id }, ctx)
            .await
    }

    /// One page of hubs with at least one item created in `[start, end]`.
    ///
    /// # Errors
    ///
    /// - `Invalid` if `start > end`, `page < 1`, or `limit` is out of bounds
    /// - `NotFound(NoItemsInRange)` if the window holds no items
    /// - `InvalidRange` if the page starts past the qualifying hubs
    pub async fn generate_report(
        &self,
        start: Timestamp,
        end: Timestamp,
        page: u32,
        limit: u32,
        ctx: RequestContext,
    ) -> Result<Vec<ReportEntry>, IntakeError> {
        let query = GenerateReportQuery {
            window: ReportWindow::new(start, end)?,
            page: PageRequest::new(page, limit, self.max_page_limit)?,
        };
        self.generate_report.handle(query, ctx).await
    }
}
