//! GenerateReportHandler - joins items, sessions and hubs over a time window.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::handlers::lookup::record_failure;
use crate::domain::foundation::RequestContext;
use crate::domain::report::{
    assemble, referenced_hub_ids, referenced_session_ids, PageRequest, ReportEntry, ReportWindow,
};
use crate::domain::{IntakeError, NotFoundKind};
use crate::ports::{HubRepository, ItemRepository, SessionRepository};

/// Query for one page of the hub report.
#[derive(Debug, Clone)]
pub struct GenerateReportQuery {
    pub window: ReportWindow,
    pub page: PageRequest,
}

/// Handler for the aggregation report. Read-only; takes no hub locks.
pub struct GenerateReportHandler {
    hubs: Arc<dyn HubRepository>,
    sessions: Arc<dyn SessionRepository>,
    items: Arc<dyn ItemRepository>,
}

impl GenerateReportHandler {
    pub fn new(
        hubs: Arc<dyn HubRepository>,
        sessions: Arc<dyn SessionRepository>,
        items: Arc<dyn ItemRepository>,
    ) -> Self {
        Self {
            hubs,
            sessions,
            items,
        }
    }

    #[tracing::instrument(
        name = "generate_report",
        skip_all,
        fields(
            start = %query.window.start(),
            end = %query.window.end(),
            page = query.page.page(),
            limit = query.page.limit(),
            correlation_id = %ctx.correlation_id(),
            source = ctx.source()
        )
    )]
    pub async fn handle(
        &self,
        query: GenerateReportQuery,
        ctx: RequestContext,
    ) -> Result<Vec<ReportEntry>, IntakeError> {
        self.execute(&query).await.inspect_err(record_failure)
    }

    async fn execute(&self, query: &GenerateReportQuery) -> Result<Vec<ReportEntry>, IntakeError> {
        let window = &query.window;

        // 1. Items inside the window
        let mut items = self
            .items
            .find_in_time_range(window.start(), window.end())
            .await
            .map_err(|e| {
                IntakeError::upstream(
                    "find_items_in_range",
                    format!("{}..={}", window.start(), window.end()),
                    e,
                )
            })?;
        items.retain(|item| window.contains(item.created_at()));
        if items.is_empty() {
            return Err(NotFoundKind::NoItemsInRange {
                start: *window.start(),
                end: *window.end(),
            }
            .into());
        }

        // 2. Sessions owning those items
        let session_ids = referenced_session_ids(&items);
        debug!(items = items.len(), sessions = session_ids.len(), "loading sessions");
        let sessions = self
            .sessions
            .find_by_ids(&session_ids)
            .await
            .map_err(|e| {
                IntakeError::upstream(
                    "find_sessions_by_ids",
                    format!("{} sessions", session_ids.len()),
                    e,
                )
            })?;

        // 3. Hubs owning those sessions
        let hub_ids = referenced_hub_ids(&sessions);
        debug!(hubs = hub_ids.len(), "loading hubs");
        let hubs = self
            .hubs
            .find_by_ids(&hub_ids)
            .await
            .map_err(|e| {
                IntakeError::upstream("find_hubs_by_ids", format!("{} hubs", hub_ids.len()), e)
            })?;

        // 4. Join, order, paginate
        let entries = assemble(hubs, sessions, items, &query.page)?;
        info!(hubs = entries.len(), "report generated");

        Ok(entries)
    }
}
