//! ListHubsHandler - pages through registered hubs.

use std::sync::Arc;

use tracing::debug;

use crate::application::handlers::lookup::record_failure;
use crate::domain::foundation::RequestContext;
use crate::domain::hub::Hub;
use crate::domain::report::PageRequest;
use crate::domain::{IntakeError, InvalidRangeKind};
use crate::ports::HubRepository;

/// Query for one page of hubs in registration order.
#[derive(Debug, Clone)]
pub struct ListHubsQuery {
    pub page: PageRequest,
}

/// Handler for listing hubs.
pub struct ListHubsHandler {
    hubs: Arc<dyn HubRepository>,
}

impl ListHubsHandler {
    pub fn new(hubs: Arc<dyn HubRepository>) -> Self {
        Self { hubs }
    }

    #[tracing::instrument(
        name = "list_hubs",
        skip_all,
        fields(
            page = query.page.page(),
            limit = query.page.limit(),
            correlation_id = %ctx.correlation_id(),
            source = ctx.source()
        )
    )]
    pub async fn handle(
        &self,
        query: ListHubsQuery,
        ctx: RequestContext,
    ) -> Result<Vec<Hub>, IntakeError> {
        self.execute(&query.page).await.inspect_err(record_failure)
    }

    async fn execute(&self, page: &PageRequest) -> Result<Vec<Hub>, IntakeError> {
        let mut hubs = self
            .hubs
            .list()
            .await
            .map_err(|e| IntakeError::upstream("list_hubs", "all hubs", e))?;
        hubs.sort_by_key(Hub::ordering_key);

        let (start, end) = page
            .bounds(hubs.len())
            .ok_or(InvalidRangeKind::PageOutOfRange {
                page: page.page(),
                limit: page.limit(),
                available: hubs.len(),
            })?;
        debug!(total = hubs.len(), start, end, "hub page cut");

        Ok(hubs.drain(start..end).collect())
    }
}
