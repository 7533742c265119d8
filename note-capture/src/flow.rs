use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use journal_store::JournalEntry;
use speech_bridge::{RecognizerEvent, TranscriptState};

use crate::error::{CaptureError, CaptureResult};
use crate::seams::{DocumentAnalyzer, EntryStore, Summarizer};

/// A file the user picked for analysis, held locally until the explicit
/// analyze action.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub filename: String,
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Result of a save action
#[derive(Debug, Clone)]
pub enum SaveOutcome {
    /// The transcript was empty or whitespace-only; nothing was saved.
    EmptyNote,
    /// The entry was created and prepended to the displayed list.
    Saved(JournalEntry),
}

#[derive(Default)]
struct FlowState {
    transcript: TranscriptState,
    entries: Vec<JournalEntry>,
    selected_file: Option<SelectedFile>,
}

/// Clears the in-flight flag when an operation finishes or bails early.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The note capture flow for one authenticated user
pub struct NoteCaptureFlow {
    owner_id: Uuid,
    summarizer: Arc<dyn Summarizer>,
    store: Arc<dyn EntryStore>,
    analyzer: Arc<dyn DocumentAnalyzer>,
    state: Mutex<FlowState>,
    in_flight: AtomicBool,
}

impl NoteCaptureFlow {
    pub fn new(
        owner_id: Uuid,
        summarizer: Arc<dyn Summarizer>,
        store: Arc<dyn EntryStore>,
        analyzer: Arc<dyn DocumentAnalyzer>,
    ) -> Self {
        Self {
            owner_id,
            summarizer,
            store,
            analyzer,
            state: Mutex::new(FlowState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Fold a recognizer event into the transcript.
    pub async fn apply_recognizer_event(&self, event: &RecognizerEvent) {
        self.state
            .lock()
            .await
            .transcript
            .apply_recognizer_event(event);
    }

    /// Record a manual edit of the note text.
    pub async fn edit(&self, text: &str) {
        self.state.lock().await.transcript.edit(text);
    }

    /// The note text currently displayed.
    pub async fn current_note(&self) -> String {
        self.state.lock().await.transcript.display()
    }

    /// The displayed entry list, newest first.
    pub async fn entries(&self) -> Vec<JournalEntry> {
        self.state.lock().await.entries.clone()
    }

    /// Replace the displayed list with a fresh query result.
    ///
    /// # Errors
    /// Returns [`CaptureError::Load`] when the store query fails.
    pub async fn load_entries(&self) -> CaptureResult<()> {
        let entries = self
            .store
            .list(self.owner_id)
            .await
            .map_err(CaptureError::Load)?;
        self.state.lock().await.entries = entries;
        Ok(())
    }

    /// Hold a picked file until the explicit analyze action.
    pub async fn select_file(&self, file: SelectedFile) {
        self.state.lock().await.selected_file = Some(file);
    }

    pub async fn clear_selected_file(&self) {
        self.state.lock().await.selected_file = None;
    }

    /// Save the current note: summarize, persist, prepend to the list and
    /// reset the transcript. A blank transcript saves nothing.
    ///
    /// # Errors
    /// [`CaptureError::Busy`] when another operation is in flight;
    /// [`CaptureError::Summarize`] / [`CaptureError::Save`] on
    /// collaborator failure (the transcript is kept so the user can
    /// retry).
    pub async fn save(&self) -> CaptureResult<SaveOutcome> {
        let _guard = self.try_begin()?;

        let content = self.state.lock().await.transcript.display();
        if content.trim().is_empty() {
            debug!("Save requested with blank transcript, skipping");
            return Ok(SaveOutcome::EmptyNote);
        }

        let summary = self
            .summarizer
            .summarize(content.clone())
            .await
            .map_err(CaptureError::Summarize)?;

        let entry = self
            .store
            .insert(self.owner_id, content, Some(summary))
            .await
            .map_err(CaptureError::Save)?;

        let mut state = self.state.lock().await;
        state.entries.insert(0, entry.clone());
        state.transcript.reset();
        info!(entry_id = %entry.id, "Note saved");

        Ok(SaveOutcome::Saved(entry))
    }

    /// Analyze the selected file. Refused locally, with no network call,
    /// when no file is selected or the selection is empty.
    ///
    /// # Errors
    /// [`CaptureError::Busy`], [`CaptureError::NoFileSelected`] or
    /// [`CaptureError::Analyze`].
    pub async fn analyze(&self) -> CaptureResult<String> {
        let _guard = self.try_begin()?;

        let file = self
            .state
            .lock()
            .await
            .selected_file
            .clone()
            .filter(|file| !file.data.is_empty())
            .ok_or(CaptureError::NoFileSelected)?;

        self.analyzer
            .analyze(self.owner_id, file.filename, file.data, file.content_type)
            .await
            .map_err(CaptureError::Analyze)
    }

    fn try_begin(&self) -> CaptureResult<InFlightGuard<'_>> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(CaptureError::Busy);
        }
        Ok(InFlightGuard(&self.in_flight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seams::{MockDocumentAnalyzer, MockEntryStore, MockSummarizer};
    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Notify;

    fn entry(owner_id: Uuid, content: &str, summary: &str) -> JournalEntry {
        JournalEntry {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            content: content.to_string(),
            summary: Some(summary.to_string()),
            created_by: owner_id,
        }
    }

    fn flow_with(
        owner_id: Uuid,
        summarizer: MockSummarizer,
        store: MockEntryStore,
        analyzer: MockDocumentAnalyzer,
    ) -> NoteCaptureFlow {
        NoteCaptureFlow::new(
            owner_id,
            Arc::new(summarizer),
            Arc::new(store),
            Arc::new(analyzer),
        )
    }

    fn final_segment(text: &str) -> RecognizerEvent {
        RecognizerEvent {
            text: text.to_string(),
            is_final: true,
        }
    }

    #[tokio::test]
    async fn blank_transcript_saves_nothing() {
        let mut summarizer = MockSummarizer::new();
        summarizer.expect_summarize().never();
        let mut store = MockEntryStore::new();
        store.expect_insert().never();

        let flow = flow_with(
            Uuid::new_v4(),
            summarizer,
            store,
            MockDocumentAnalyzer::new(),
        );
        flow.edit("   \n  ").await;

        let outcome = flow.save().await.unwrap();
        assert!(matches!(outcome, SaveOutcome::EmptyNote));
        assert!(flow.entries().await.is_empty());
    }

    #[tokio::test]
    async fn save_summarizes_once_prepends_and_resets() {
        let owner_id = Uuid::new_v4();
        let note = "Patient reports mild headache.";

        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .withf(move |text| text == note)
            .times(1)
            .returning(|_| Ok("Mild headache reported.".to_string()));

        let mut store = MockEntryStore::new();
        store
            .expect_insert()
            .withf(move |owner, content, summary| {
                *owner == owner_id
                    && content == note
                    && summary.as_deref() == Some("Mild headache reported.")
            })
            .times(1)
            .returning(|owner, content, summary| {
                Ok(JournalEntry {
                    id: Uuid::new_v4(),
                    created_at: Utc::now(),
                    content,
                    summary,
                    created_by: owner,
                })
            });

        let flow = flow_with(owner_id, summarizer, store, MockDocumentAnalyzer::new());
        flow.apply_recognizer_event(&final_segment(note)).await;

        let outcome = flow.save().await.unwrap();
        let SaveOutcome::Saved(saved) = outcome else {
            panic!("expected a saved entry");
        };
        assert_eq!(saved.content, note);
        assert!(saved.summary.as_deref().is_some_and(|s| !s.is_empty()));

        let entries = flow.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, saved.id);
        assert_eq!(flow.current_note().await, "");
    }

    #[tokio::test]
    async fn saved_entry_is_prepended_to_existing_list() {
        let owner_id = Uuid::new_v4();

        let older = entry(owner_id, "older note", "older summary");
        let older_for_list = older.clone();
        let mut store = MockEntryStore::new();
        store
            .expect_list()
            .returning(move |_| Ok(vec![older_for_list.clone()]));
        store.expect_insert().returning(|owner, content, summary| {
            Ok(JournalEntry {
                id: Uuid::new_v4(),
                created_at: Utc::now(),
                content,
                summary,
                created_by: owner,
            })
        });

        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .returning(|_| Ok("new summary".to_string()));

        let flow = flow_with(owner_id, summarizer, store, MockDocumentAnalyzer::new());
        flow.load_entries().await.unwrap();
        flow.edit("new note").await;
        flow.save().await.unwrap();

        let entries = flow.entries().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "new note");
        assert_eq!(entries[1].id, older.id);
    }

    #[tokio::test]
    async fn summarize_failure_keeps_the_transcript() {
        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .returning(|_| Err(anyhow::anyhow!("upstream unavailable")));
        let mut store = MockEntryStore::new();
        store.expect_insert().never();

        let flow = flow_with(
            Uuid::new_v4(),
            summarizer,
            store,
            MockDocumentAnalyzer::new(),
        );
        flow.edit("note text").await;

        let result = flow.save().await;
        assert!(matches!(result, Err(CaptureError::Summarize(_))));
        assert_eq!(flow.current_note().await, "note text");
        assert!(flow.entries().await.is_empty());
    }

    #[tokio::test]
    async fn analyze_without_selection_is_refused_locally() {
        let mut analyzer = MockDocumentAnalyzer::new();
        analyzer.expect_analyze().never();

        let flow = flow_with(
            Uuid::new_v4(),
            MockSummarizer::new(),
            MockEntryStore::new(),
            analyzer,
        );

        let result = flow.analyze().await;
        assert!(matches!(result, Err(CaptureError::NoFileSelected)));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Please select a file to upload"
        );
    }

    #[tokio::test]
    async fn analyze_with_empty_file_is_refused_locally() {
        let mut analyzer = MockDocumentAnalyzer::new();
        analyzer.expect_analyze().never();

        let flow = flow_with(
            Uuid::new_v4(),
            MockSummarizer::new(),
            MockEntryStore::new(),
            analyzer,
        );
        flow.select_file(SelectedFile {
            filename: "empty.png".to_string(),
            data: Vec::new(),
            content_type: "image/png".to_string(),
        })
        .await;

        let result = flow.analyze().await;
        assert!(matches!(result, Err(CaptureError::NoFileSelected)));
    }

    #[tokio::test]
    async fn analyze_returns_the_description() {
        let owner_id = Uuid::new_v4();
        let mut analyzer = MockDocumentAnalyzer::new();
        analyzer
            .expect_analyze()
            .withf(move |owner, filename, data, content_type| {
                *owner == owner_id
                    && filename == "scan.png"
                    && !data.is_empty()
                    && content_type == "image/png"
            })
            .times(1)
            .returning(|_, _, _, _| Ok("Chest X-ray, no abnormalities.".to_string()));

        let flow = flow_with(
            owner_id,
            MockSummarizer::new(),
            MockEntryStore::new(),
            analyzer,
        );
        flow.select_file(SelectedFile {
            filename: "scan.png".to_string(),
            data: vec![0x89, 0x50],
            content_type: "image/png".to_string(),
        })
        .await;

        let description = flow.analyze().await.unwrap();
        assert_eq!(description, "Chest X-ray, no abnormalities.");
    }

    /// Summarizer that parks until released, to hold a save in flight.
    struct BlockingSummarizer {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl Summarizer for BlockingSummarizer {
        async fn summarize(&self, _text: String) -> anyhow::Result<String> {
            self.started.notify_one();
            self.release.notified().await;
            Ok("summary".to_string())
        }
    }

    #[tokio::test]
    async fn second_operation_while_in_flight_is_busy() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());

        let mut store = MockEntryStore::new();
        store.expect_insert().returning(|owner, content, summary| {
            Ok(JournalEntry {
                id: Uuid::new_v4(),
                created_at: Utc::now(),
                content,
                summary,
                created_by: owner,
            })
        });

        let flow = Arc::new(NoteCaptureFlow::new(
            Uuid::new_v4(),
            Arc::new(BlockingSummarizer {
                started: Arc::clone(&started),
                release: Arc::clone(&release),
            }),
            Arc::new(store),
            Arc::new(MockDocumentAnalyzer::new()),
        ));
        flow.edit("note under save").await;
        flow.select_file(SelectedFile {
            filename: "scan.png".to_string(),
            data: vec![1],
            content_type: "image/png".to_string(),
        })
        .await;

        let saving = {
            let flow = Arc::clone(&flow);
            tokio::spawn(async move { flow.save().await })
        };
        started.notified().await;

        // Both a second save and an analyze are rejected while the first
        // save is still in flight.
        assert!(matches!(flow.save().await, Err(CaptureError::Busy)));
        assert!(matches!(flow.analyze().await, Err(CaptureError::Busy)));

        release.notify_one();
        let outcome = saving.await.unwrap().unwrap();
        assert!(matches!(outcome, SaveOutcome::Saved(_)));
    }
}
