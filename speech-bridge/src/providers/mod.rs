pub mod azure;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::SpeechResult;

/// A single recognizer callback: either an interim hypothesis or a
/// finalized segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerEvent {
    pub text: String,
    pub is_final: bool,
}

/// A live continuous-recognition session.
///
/// Callers feed captured audio chunks into `audio` and read transcript
/// events from `events`. The engine signals the end of the session by
/// closing the event channel.
pub struct RecognizerSession {
    pub audio: mpsc::Sender<Vec<u8>>,
    pub events: mpsc::Receiver<RecognizerEvent>,
}

/// Trait for hosted speech providers
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Start a continuous recognition session.
    async fn start_session(&self) -> SpeechResult<RecognizerSession>;

    /// Synthesize text to playable audio.
    async fn synthesize(&self, text: &str) -> SpeechResult<Vec<u8>>;
}
