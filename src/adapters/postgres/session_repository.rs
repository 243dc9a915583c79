//! PostgreSQL implementation of SessionRepository.
//!
//! The `sessions_one_active_per_hub` partial unique index rejects a second
//! active session for a hub; that violation surfaces as `ActiveSessionExists`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ErrorCode, HubId, SessionId, SessionStatus, Timestamp,
};
use crate::domain::session::Session;
use crate::ports::SessionRepository;

use super::{column, query_failed};

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO sessions (id, hub_id, started_at, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.hub_id().as_uuid())
        .bind(session.started_at().as_datetime())
        .bind(session.status().as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::new(
                    ErrorCode::ActiveSessionExists,
                    format!("Hub {} already has an active session", session.hub_id()),
                ))
            }
            Err(e) => Err(query_failed("insert session", e)),
        }
    }

    async fn mark_closed(&self, id: &SessionId) -> Result<Session, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE sessions SET status = 'closed'
            WHERE id = $1
            RETURNING id, hub_id, started_at, status
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("close session", e))?;

        match row {
            Some(row) => row_to_session(&row),
            None => Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            )),
        }
    }

    async fn find_current_for_hub(&self, hub_id: &HubId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, hub_id, started_at, status
            FROM sessions
            WHERE hub_id = $1
            ORDER BY seq DESC
            LIMIT 1
            "#,
        )
        .bind(hub_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("fetch current session", e))?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn find_by_ids(&self, ids: &[SessionId]) -> Result<Vec<Session>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, hub_id, started_at, status
            FROM sessions
            WHERE id = ANY($1)
            ORDER BY started_at, id
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("fetch sessions by ids", e))?;

        if rows.is_empty() {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("None of {} sessions found", ids.len()),
            ));
        }

        rows.iter().map(row_to_session).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn parse_status(s: &str) -> Result<SessionStatus, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", s),
        )
    })
}

fn row_to_session(row: &PgRow) -> Result<Session, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let hub_id: uuid::Uuid = column(row, "hub_id")?;
    let started_at: chrono::DateTime<chrono::Utc> = column(row, "started_at")?;
    let status: String = column(row, "status")?;

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        HubId::from_uuid(hub_id),
        Timestamp::from_datetime(started_at),
        parse_status(&status)?,
    ))
}
