use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{JournalError, JournalResult};
use crate::models::JournalEntry;

/// Repository for the `journal_entries` table
#[derive(Clone)]
pub struct JournalRepository {
    pool: PgPool,
}

impl JournalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a new entry and return the created row.
    ///
    /// # Errors
    /// Returns [`JournalError::SqlxError`] when the insert fails.
    pub async fn insert(
        &self,
        owner_id: Uuid,
        content: &str,
        summary: Option<&str>,
    ) -> JournalResult<JournalEntry> {
        let entry = sqlx::query_as::<_, JournalEntry>(
            r#"INSERT INTO journal_entries (content, summary, created_by)
               VALUES ($1, $2, $3)
               RETURNING id, created_at, content, summary, created_by"#,
        )
        .bind(content)
        .bind(summary)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        info!(entry_id = %entry.id, owner_id = %owner_id, "Journal entry created");
        Ok(entry)
    }

    /// List the owner's entries, newest first.
    ///
    /// The result is eagerly materialized; callers re-query for fresh
    /// data rather than holding a live feed.
    ///
    /// # Errors
    /// Returns [`JournalError::SqlxError`] when the query fails.
    pub async fn list(&self, owner_id: Uuid) -> JournalResult<Vec<JournalEntry>> {
        let entries = sqlx::query_as::<_, JournalEntry>(
            r#"SELECT id, created_at, content, summary, created_by
               FROM journal_entries
               WHERE created_by = $1
               ORDER BY created_at DESC"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Delete an entry by id, scoped to its owner.
    ///
    /// The owner scope keeps ownership enforced at this boundary even
    /// when the store's own row-level policy is not active.
    ///
    /// # Errors
    /// Returns [`JournalError::NotFound`] when no row matched.
    pub async fn remove(&self, entry_id: Uuid, owner_id: Uuid) -> JournalResult<()> {
        let result = sqlx::query(
            r#"DELETE FROM journal_entries WHERE id = $1 AND created_by = $2"#,
        )
        .bind(entry_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(JournalError::NotFound);
        }

        info!(entry_id = %entry_id, owner_id = %owner_id, "Journal entry deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // Repository queries are exercised against a live database in
    // deployment; these tests cover the row model contract the handlers
    // rely on.

    #[test]
    fn entry_serializes_with_nullable_summary() {
        let entry = JournalEntry {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            content: "Patient reports mild headache.".to_string(),
            summary: None,
            created_by: Uuid::new_v4(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["content"], "Patient reports mild headache.");
        assert!(json["summary"].is_null());
    }

    #[test]
    fn entry_round_trips_through_json() {
        let entry = JournalEntry {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            content: "content".to_string(),
            summary: Some("summary".to_string()),
            created_by: Uuid::new_v4(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: JournalEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, entry.id);
        assert_eq!(parsed.summary.as_deref(), Some("summary"));
    }
}
