//! CreateHubHandler - registers a new pickup hub.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::lookup::record_failure;
use crate::domain::foundation::{HubId, RequestContext, ValidationError};
use crate::domain::hub::Hub;
use crate::domain::IntakeError;
use crate::ports::{Clock, HubRepository, IntakeObserver};

/// Command to register a hub at a location.
#[derive(Debug, Clone)]
pub struct CreateHubCommand {
    pub location: String,
}

/// Handler for registering hubs.
pub struct CreateHubHandler {
    hubs: Arc<dyn HubRepository>,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn IntakeObserver>,
    allowed_locations: Vec<String>,
}

impl CreateHubHandler {
    /// An empty `allowed_locations` accepts any non-blank location.
    pub fn new(
        hubs: Arc<dyn HubRepository>,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn IntakeObserver>,
        allowed_locations: Vec<String>,
    ) -> Self {
        Self {
            hubs,
            clock,
            observer,
            allowed_locations,
        }
    }

    #[tracing::instrument(
        name = "create_hub",
        skip_all,
        fields(
            location = %cmd.location,
            correlation_id = %ctx.correlation_id(),
            source = ctx.source()
        )
    )]
    pub async fn handle(
        &self,
        cmd: CreateHubCommand,
        ctx: RequestContext,
    ) -> Result<Hub, IntakeError> {
        self.execute(cmd).await.inspect_err(record_failure)
    }

    async fn execute(&self, cmd: CreateHubCommand) -> Result<Hub, IntakeError> {
        let hub = Hub::register(HubId::new(), cmd.location, self.clock.now())?;

        if !self.is_allowed(hub.location()) {
            return Err(ValidationError::not_allowed("location", hub.location()).into());
        }

        self.hubs
            .save(&hub)
            .await
            .map_err(|e| IntakeError::upstream("save_hub", format!("hub {}", hub.id()), e))?;

        self.observer.hub_registered(&hub);
        info!(hub_id = %hub.id(), "hub registered");

        Ok(hub)
    }

    fn is_allowed(&self, location: &str) -> bool {
        self.allowed_locations.is_empty() || self.allowed_locations.iter().any(|l| l == location)
    }
}
