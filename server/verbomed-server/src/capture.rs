//! Wiring between the capture flow seams and the real collaborators
//!
//! The flow works against the [`Summarizer`], [`EntryStore`] and
//! [`DocumentAnalyzer`] traits; the adapters here bind them to the AI
//! gateway, the journal repository and the document store.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use ai_gateway::AiGatewayClient;
use journal_store::{JournalEntry, JournalRepository};
use note_capture::{DocumentAnalyzer, EntryStore, NoteCaptureFlow, Summarizer};
use storage_bridge::DocumentStore;

use crate::server::VerbomedServer;

struct GatewaySummarizer {
    client: Arc<AiGatewayClient>,
}

#[async_trait]
impl Summarizer for GatewaySummarizer {
    async fn summarize(&self, text: String) -> anyhow::Result<String> {
        Ok(self.client.summarize(&text).await?)
    }
}

struct RepositoryEntryStore {
    repository: JournalRepository,
}

#[async_trait]
impl EntryStore for RepositoryEntryStore {
    async fn insert(
        &self,
        owner_id: Uuid,
        content: String,
        summary: Option<String>,
    ) -> anyhow::Result<JournalEntry> {
        Ok(self
            .repository
            .insert(owner_id, &content, summary.as_deref())
            .await?)
    }

    async fn list(&self, owner_id: Uuid) -> anyhow::Result<Vec<JournalEntry>> {
        Ok(self.repository.list(owner_id).await?)
    }

    async fn remove(&self, entry_id: Uuid, owner_id: Uuid) -> anyhow::Result<()> {
        Ok(self.repository.remove(entry_id, owner_id).await?)
    }
}

/// Stores the document and describes it through the vision model.
struct StoredDocumentAnalyzer {
    documents: Arc<DocumentStore>,
    client: Arc<AiGatewayClient>,
}

#[async_trait]
impl DocumentAnalyzer for StoredDocumentAnalyzer {
    async fn analyze(
        &self,
        owner_id: Uuid,
        filename: String,
        data: Vec<u8>,
        content_type: String,
    ) -> anyhow::Result<String> {
        let signed_url = self
            .documents
            .put(owner_id, &filename, data, &content_type)
            .await?;
        Ok(self.client.analyze_image(&signed_url).await?)
    }
}

impl VerbomedServer {
    /// Build a capture flow for one authenticated user, bound to the
    /// server's collaborators.
    pub fn capture_flow(&self, owner_id: Uuid) -> NoteCaptureFlow {
        NoteCaptureFlow::new(
            owner_id,
            Arc::new(GatewaySummarizer {
                client: Arc::clone(&self.ai),
            }),
            Arc::new(RepositoryEntryStore {
                repository: self.journal.clone(),
            }),
            Arc::new(StoredDocumentAnalyzer {
                documents: Arc::clone(&self.documents),
                client: Arc::clone(&self.ai),
            }),
        )
    }
}
