//! Feedback repository implementation.
//!
//! PostgreSQL-backed `FeedbackStore`. Text search is a case-sensitive
//! substring match on `subject` (`strpos`), results ordered by
//! `(created_at, id)`.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use feedback_desk_application::{FeedbackQuery, FeedbackStore, StoreError, StoreResult};
use feedback_desk_domain::{FeedbackId, FeedbackRecord, FeedbackStatus};

use crate::database::DatabasePool;
use crate::schema::{columns, insert_placeholders, select_list, FEEDBACK_TABLE};
use crate::{Error, Result};

/// SQL text built once from the schema definition.
struct Statements {
    insert: String,
    select_by_id: String,
    search: String,
    update: String,
    delete: String,
}

impl Statements {
    fn build() -> Self {
        let select = select_list();
        Self {
            insert: format!(
                "INSERT INTO {FEEDBACK_TABLE} ({select}) VALUES ({}) RETURNING {select}",
                insert_placeholders()
            ),
            select_by_id: format!(
                "SELECT {select} FROM {FEEDBACK_TABLE} WHERE {} = $1",
                columns::ID
            ),
            search: format!(
                "SELECT {select} FROM {FEEDBACK_TABLE} \
                 WHERE ($1::text IS NULL OR strpos({subject}, $1) > 0) \
                 AND ($2::text IS NULL OR {status} = $2) \
                 ORDER BY {created_at}, {id}",
                subject = columns::SUBJECT,
                status = columns::STATUS,
                created_at = columns::CREATED_AT,
                id = columns::ID,
            ),
            update: format!(
                "UPDATE {FEEDBACK_TABLE} SET {} = $2, {} = $3, {} = $4, {} = $5, {} = $6, {} = $7 \
                 WHERE {} = $1 RETURNING {select}",
                columns::SENDER_NAME,
                columns::EMAIL,
                columns::STATUS,
                columns::SUBJECT,
                columns::CONTENT,
                columns::UPDATED_AT,
                columns::ID,
            ),
            delete: format!("DELETE FROM {FEEDBACK_TABLE} WHERE {} = $1", columns::ID),
        }
    }
}

/// PostgreSQL implementation of FeedbackStore.
pub struct PgFeedbackRepository {
    pool: DatabasePool,
    sql: Statements,
}

impl PgFeedbackRepository {
    /// Create a new PostgreSQL feedback repository.
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            pool,
            sql: Statements::build(),
        }
    }

    async fn fetch_optional(&self, id: FeedbackId) -> Result<Option<FeedbackRecord>> {
        let row = sqlx::query(&self.sql.select_by_id)
            .bind(id.as_uuid())
            .fetch_optional(self.pool.pool())
            .await
            .map_err(Error::Database)?;

        row.map(row_to_feedback).transpose()
    }
}

/// Convert a database row to a FeedbackRecord.
fn row_to_feedback(row: PgRow) -> Result<FeedbackRecord> {
    let id: Uuid = row.try_get(columns::ID)?;
    let status_str: String = row.try_get(columns::STATUS)?;

    Ok(FeedbackRecord {
        id: FeedbackId::from(id),
        sender_name: row.try_get(columns::SENDER_NAME)?,
        email: row.try_get(columns::EMAIL)?,
        status: parse_status(&status_str)?,
        subject: row.try_get(columns::SUBJECT)?,
        content: row.try_get(columns::CONTENT)?,
        created_at: row.try_get(columns::CREATED_AT)?,
        updated_at: row.try_get(columns::UPDATED_AT)?,
    })
}

fn parse_status(raw: &str) -> Result<FeedbackStatus> {
    raw.parse::<FeedbackStatus>()
        .map_err(|e| Error::CorruptRow(e.to_string()))
}

impl From<Error> for StoreError {
    fn from(err: Error) -> Self {
        warn!(error = %err, "Feedback store operation failed");
        StoreError::Unavailable(err.to_string())
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackRepository {
    #[instrument(skip(self, record), fields(feedback_id = %record.id))]
    async fn create(&self, record: &FeedbackRecord) -> StoreResult<FeedbackRecord> {
        let row = sqlx::query(&self.sql.insert)
            .bind(record.id.as_uuid())
            .bind(&record.sender_name)
            .bind(&record.email)
            .bind(record.status.as_str())
            .bind(&record.subject)
            .bind(&record.content)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(self.pool.pool())
            .await
            .map_err(Error::Database)?;

        debug!("Feedback row inserted");
        Ok(row_to_feedback(row)?)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: FeedbackId) -> StoreResult<Option<FeedbackRecord>> {
        Ok(self.fetch_optional(id).await?)
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &FeedbackQuery) -> StoreResult<Vec<FeedbackRecord>> {
        let rows = sqlx::query(&self.sql.search)
            .bind(query.text())
            .bind(query.status.map(|s| s.as_str()))
            .fetch_all(self.pool.pool())
            .await
            .map_err(Error::Database)?;

        let records = rows
            .into_iter()
            .map(row_to_feedback)
            .collect::<Result<Vec<_>>>()?;
        debug!(count = records.len(), "Feedback rows fetched");
        Ok(records)
    }

    #[instrument(skip(self, record), fields(feedback_id = %record.id))]
    async fn update(&self, record: &FeedbackRecord) -> StoreResult<FeedbackRecord> {
        let row = sqlx::query(&self.sql.update)
            .bind(record.id.as_uuid())
            .bind(&record.sender_name)
            .bind(&record.email)
            .bind(record.status.as_str())
            .bind(&record.subject)
            .bind(&record.content)
            .bind(record.updated_at)
            .fetch_optional(self.pool.pool())
            .await
            .map_err(Error::Database)?;

        match row {
            Some(row) => Ok(row_to_feedback(row)?),
            None => Err(StoreError::NotFound(record.id)),
        }
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: FeedbackId) -> StoreResult<()> {
        let result = sqlx::query(&self.sql.delete)
            .bind(id.as_uuid())
            .execute(self.pool.pool())
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        debug!("Feedback row deleted");
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        let health = self.pool.health_check().await?;
        if health.healthy {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                health.error.unwrap_or_else(|| "database unhealthy".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_use_schema() {
        let sql = Statements::build();
        assert!(sql.insert.starts_with("INSERT INTO feedback (id, sender_name"));
        assert!(sql.insert.contains("VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"));
        assert!(sql.search.contains("strpos(subject, $1) > 0"));
        assert!(sql.search.ends_with("ORDER BY created_at, id"));
        assert!(sql.update.contains("updated_at = $7 WHERE id = $1"));
        assert!(!sql.update.contains("created_at ="));
        assert_eq!(sql.delete, "DELETE FROM feedback WHERE id = $1");
    }

    #[test]
    fn test_parse_status_rejects_unknown() {
        assert_eq!(parse_status("replied").unwrap(), FeedbackStatus::Replied);
        assert!(matches!(parse_status("archived"), Err(Error::CorruptRow(_))));
    }
}
