//! Collaborator seams for the capture flow
//!
//! The flow never talks to providers directly; the server wires concrete
//! clients in behind these traits and tests substitute mocks.

use async_trait::async_trait;
use uuid::Uuid;

use journal_store::JournalEntry;

#[cfg(test)]
use mockall::automock;

/// Produces the AI summary attached to a note at save time.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: String) -> anyhow::Result<String>;
}

/// Persists and retrieves journal entries for one owner.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn insert(
        &self,
        owner_id: Uuid,
        content: String,
        summary: Option<String>,
    ) -> anyhow::Result<JournalEntry>;

    async fn list(&self, owner_id: Uuid) -> anyhow::Result<Vec<JournalEntry>>;

    async fn remove(&self, entry_id: Uuid, owner_id: Uuid) -> anyhow::Result<()>;
}

/// Stores an uploaded document and returns its AI-generated description.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        owner_id: Uuid,
        filename: String,
        data: Vec<u8>,
        content_type: String,
    ) -> anyhow::Result<String>;
}
