//! PostgreSQL implementation of HubRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, HubId, Timestamp};
use crate::domain::hub::Hub;
use crate::ports::HubRepository;

use super::{column, query_failed};

/// PostgreSQL implementation of HubRepository.
#[derive(Clone)]
pub struct PostgresHubRepository {
    pool: PgPool,
}

impl PostgresHubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HubRepository for PostgresHubRepository {
    async fn save(&self, hub: &Hub) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO hubs (id, registered_at, location)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(hub.id().as_uuid())
        .bind(hub.registered_at().as_datetime())
        .bind(hub.location())
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("insert hub", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &HubId) -> Result<Option<Hub>, DomainError> {
        let row = sqlx::query("SELECT id, registered_at, location FROM hubs WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("fetch hub", e))?;

        row.as_ref().map(row_to_hub).transpose()
    }

    async fn find_by_ids(&self, ids: &[HubId]) -> Result<Vec<Hub>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, registered_at, location
            FROM hubs
            WHERE id = ANY($1)
            ORDER BY registered_at, id
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("fetch hubs by ids", e))?;

        rows.iter().map(row_to_hub).collect()
    }

    async fn list(&self) -> Result<Vec<Hub>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, registered_at, location FROM hubs ORDER BY registered_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("list hubs", e))?;

        rows.iter().map(row_to_hub).collect()
    }
}

fn row_to_hub(row: &PgRow) -> Result<Hub, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let registered_at: chrono::DateTime<chrono::Utc> = column(row, "registered_at")?;
    let location: String = column(row, "location")?;

    Ok(Hub::reconstitute(
        HubId::from_uuid(id),
        Timestamp::from_datetime(registered_at),
        location,
    ))
}
