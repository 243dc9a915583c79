//! PostgreSQL implementation of ItemRepository.
//!
//! `items.seq` is a `BIGSERIAL` assigned on insert and breaks `created_at`
//! ties when looking up the most recent item.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ErrorCode, ItemId, ItemType, SessionId, Timestamp,
};
use crate::domain::item::Item;
use crate::ports::ItemRepository;

use super::{column, query_failed};

/// PostgreSQL implementation of ItemRepository.
#[derive(Clone)]
pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn save(&self, item: &Item) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO items (id, session_id, item_type, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.session_id().as_uuid())
        .bind(item.item_type().as_str())
        .bind(item.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("insert item", e))?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &ItemId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("delete item", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ItemNotFound,
                format!("Item not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn find_most_recent_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Item>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, session_id, item_type, created_at
            FROM items
            WHERE session_id = $1
            ORDER BY created_at DESC, seq DESC
            LIMIT 1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("fetch last item", e))?;

        row.as_ref().map(row_to_item).transpose()
    }

    async fn find_in_time_range(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<Vec<Item>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, item_type, created_at
            FROM items
            WHERE created_at BETWEEN $1 AND $2
            ORDER BY created_at, seq
            "#,
        )
        .bind(start.as_datetime())
        .bind(end.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("fetch items in range", e))?;

        rows.iter().map(row_to_item).collect()
    }
}

fn parse_item_type(s: &str) -> Result<ItemType, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid item type: {}", s),
        )
    })
}

fn row_to_item(row: &PgRow) -> Result<Item, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let session_id: uuid::Uuid = column(row, "session_id")?;
    let item_type: String = column(row, "item_type")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;

    Ok(Item::register(
        ItemId::from_uuid(id),
        SessionId::from_uuid(session_id),
        parse_item_type(&item_type)?,
        Timestamp::from_datetime(created_at),
    ))
}
