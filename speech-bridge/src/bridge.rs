use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{SpeechError, SpeechResult};
use crate::providers::{RecognizerEvent, RecognizerSession, SpeechProvider};
use crate::transcript::TranscriptState;

/// Public state of the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Idle,
    Listening,
}

/// Continuous-recognition state machine over a hosted speech provider
///
/// `Idle -> Listening` starts a provider session; recognizer events feed
/// the transcript; `Listening -> Idle` stops recognition and discards the
/// partial hypothesis. If the engine ends a session unexpectedly while
/// still `Listening`, the bridge restarts recognition to maintain
/// continuity. Restarts carry the session generation current when the end
/// was observed: `stop()` bumps the generation, so a restart racing a stop
/// installs nothing and the state label always matches the engine.
pub struct SpeechBridge {
    provider: Arc<dyn SpeechProvider>,
    state: BridgeState,
    transcript: TranscriptState,
    session: Option<RecognizerSession>,
    generation: u64,
}

impl SpeechBridge {
    pub fn new(provider: Arc<dyn SpeechProvider>) -> Self {
        Self {
            provider,
            state: BridgeState::Idle,
            transcript: TranscriptState::new(),
            session: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn transcript(&self) -> &TranscriptState {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut TranscriptState {
        &mut self.transcript
    }

    /// Start continuous recognition. A no-op when already listening.
    ///
    /// # Errors
    /// Propagates the provider's session-start failure.
    pub async fn start(&mut self) -> SpeechResult<()> {
        if self.state == BridgeState::Listening {
            return Ok(());
        }

        let session = self.provider.start_session().await?;
        self.generation = self.generation.wrapping_add(1);
        self.session = Some(session);
        self.state = BridgeState::Listening;
        info!(generation = self.generation, "Recognition started");
        Ok(())
    }

    /// Stop recognition and discard the in-progress hypothesis.
    pub fn stop(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.session = None;
        self.state = BridgeState::Idle;
        self.transcript.discard_partial();
        info!("Recognition stopped");
    }

    /// Forward a captured audio chunk to the live session.
    ///
    /// # Errors
    /// Returns [`SpeechError::Recognition`] when no session is live.
    pub async fn push_audio(&mut self, chunk: Vec<u8>) -> SpeechResult<()> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| SpeechError::Recognition("no recognition session is live".to_string()))?;

        session
            .audio
            .send(chunk)
            .await
            .map_err(|_| SpeechError::Recognition("recognition session ended".to_string()))
    }

    /// Wait for the next recognizer event and fold it into the transcript.
    ///
    /// Returns `Ok(None)` once the bridge is idle. An unexpected session
    /// end while listening triggers a generation-guarded restart.
    ///
    /// # Errors
    /// Propagates a provider failure during restart.
    pub async fn next_event(&mut self) -> SpeechResult<Option<RecognizerEvent>> {
        loop {
            if self.state != BridgeState::Listening {
                return Ok(None);
            }
            let Some(session) = self.session.as_mut() else {
                return Ok(None);
            };

            match session.events.recv().await {
                Some(event) => {
                    self.transcript.apply_recognizer_event(&event);
                    return Ok(Some(event));
                }
                None => {
                    warn!("Recognizer session ended unexpectedly, restarting");
                    let generation = self.generation;
                    let fresh = self.provider.start_session().await?;
                    if self.generation != generation || self.state != BridgeState::Listening {
                        // A stop raced the restart; the fresh session is
                        // dropped and the engine stays stopped.
                        return Ok(None);
                    }
                    self.session = Some(fresh);
                }
            }
        }
    }

    /// Synthesize text and return the playable audio payload.
    ///
    /// # Errors
    /// Returns [`SpeechError::Synthesis`] on upstream failure.
    pub async fn speak(&self, text: &str) -> SpeechResult<Vec<u8>> {
        self.provider.synthesize(text).await
    }
}
