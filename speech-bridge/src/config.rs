use secrecy::SecretString;

use crate::error::{SpeechError, SpeechResult};

/// Hosted speech service configuration
///
/// Acts as the capability check for the speech feature: when the host has
/// no speech credentials, [`SpeechConfig::from_env`] returns a typed
/// [`SpeechError::Unsupported`] and no bridge is constructed.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// Service region, e.g. `eastus`
    pub region: String,
    /// Subscription key for the speech service
    pub subscription_key: SecretString,
    /// Recognition language
    pub language: String,
    /// Synthesis voice name
    pub voice: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl SpeechConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns [`SpeechError::Unsupported`] when `SPEECH_KEY` is absent,
    /// which callers surface once (e.g. as an inline banner) instead of
    /// failing per call.
    pub fn from_env() -> SpeechResult<Self> {
        let subscription_key = std::env::var("SPEECH_KEY").map_err(|_| {
            SpeechError::Unsupported("SPEECH_KEY is not set; dictation and playback are disabled".to_string())
        })?;

        let region = std::env::var("SPEECH_REGION").unwrap_or_else(|_| "eastus".to_string());

        let language = std::env::var("SPEECH_LANGUAGE").unwrap_or_else(|_| "en-US".to_string());

        let voice =
            std::env::var("SPEECH_VOICE").unwrap_or_else(|_| "en-US-JennyNeural".to_string());

        let request_timeout_secs = std::env::var("SPEECH_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            region,
            subscription_key: SecretString::new(subscription_key),
            language,
            voice,
            request_timeout_secs,
        })
    }
}
