use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A saved journal entry
///
/// `id` and `created_at` are server-assigned. An entry is visible only to
/// its owning user (`created_by`) and is never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub content: String,
    pub summary: Option<String>,
    pub created_by: Uuid,
}
