//! Hosted Azure-style speech provider
//!
//! Continuous recognition is driven chunk-wise over the service's REST
//! recognition endpoint: each audio chunk pushed into the session is
//! transcribed as one finalized segment. Synthesis is a one-shot SSML
//! request returning MP3 audio.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::SpeechConfig;
use crate::error::{SpeechError, SpeechResult};
use crate::providers::{RecognizerEvent, RecognizerSession, SpeechProvider};

/// Audio chunks buffered per session before backpressure applies.
const SESSION_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    #[serde(rename = "RecognitionStatus")]
    status: String,
    #[serde(rename = "DisplayText", default)]
    display_text: Option<String>,
}

pub struct AzureSpeechProvider {
    http: reqwest::Client,
    config: SpeechConfig,
}

impl AzureSpeechProvider {
    /// Create a provider from a capability-checked configuration.
    ///
    /// # Errors
    /// Returns [`SpeechError::Network`] if the HTTP client cannot be built.
    pub fn new(config: SpeechConfig) -> SpeechResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    fn recognition_url(&self) -> String {
        format!(
            "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1?language={}&format=simple",
            self.config.region, self.config.language
        )
    }

    fn synthesis_url(&self) -> String {
        format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
            self.config.region
        )
    }

    fn ssml(&self, text: &str) -> String {
        format!(
            "<speak version='1.0' xml:lang='{lang}'><voice name='{voice}'>{text}</voice></speak>",
            lang = self.config.language,
            voice = self.config.voice,
            text = escape_xml(text)
        )
    }
}

#[async_trait]
impl SpeechProvider for AzureSpeechProvider {
    async fn start_session(&self) -> SpeechResult<RecognizerSession> {
        let (audio_tx, mut audio_rx) = mpsc::channel::<Vec<u8>>(SESSION_CHANNEL_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel::<RecognizerEvent>(SESSION_CHANNEL_CAPACITY);

        let http = self.http.clone();
        let url = self.recognition_url();
        let key = self.config.subscription_key.clone();

        tokio::spawn(async move {
            while let Some(chunk) = audio_rx.recv().await {
                match recognize_chunk(&http, &url, &key, chunk).await {
                    Ok(Some(text)) => {
                        let event = RecognizerEvent {
                            text,
                            is_final: true,
                        };
                        if event_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!("Recognizer returned no match for chunk");
                    }
                    Err(e) => {
                        // Ending the session here closes the event channel;
                        // the bridge decides whether to restart.
                        warn!(error = %e, "Recognition request failed, ending session");
                        break;
                    }
                }
            }
        });

        Ok(RecognizerSession {
            audio: audio_tx,
            events: event_rx,
        })
    }

    async fn synthesize(&self, text: &str) -> SpeechResult<Vec<u8>> {
        let response = self
            .http
            .post(self.synthesis_url())
            .header(
                "Ocp-Apim-Subscription-Key",
                self.config.subscription_key.expose_secret(),
            )
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", "audio-16khz-64kbitrate-mono-mp3")
            .body(self.ssml(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Synthesis(format!(
                "upstream returned {status}: {body}"
            )));
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(SpeechError::Synthesis(
                "upstream returned empty audio".to_string(),
            ));
        }

        Ok(audio.to_vec())
    }
}

async fn recognize_chunk(
    http: &reqwest::Client,
    url: &str,
    key: &SecretString,
    chunk: Vec<u8>,
) -> SpeechResult<Option<String>> {
    let response = http
        .post(url)
        .header("Ocp-Apim-Subscription-Key", key.expose_secret())
        .header(
            "Content-Type",
            "audio/wav; codecs=audio/pcm; samplerate=16000",
        )
        .body(chunk)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SpeechError::Recognition(format!(
            "upstream returned {status}"
        )));
    }

    let recognition: RecognitionResponse = response.json().await?;
    if recognition.status == "Success" {
        Ok(recognition.display_text.filter(|text| !text.is_empty()))
    } else {
        Ok(None)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssml_escapes_reserved_characters() {
        assert_eq!(escape_xml("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn recognition_response_parses_simple_format() {
        let json = r#"{"RecognitionStatus":"Success","DisplayText":"Patient reports mild headache.","Offset":0,"Duration":100}"#;
        let parsed: RecognitionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "Success");
        assert_eq!(
            parsed.display_text.as_deref(),
            Some("Patient reports mild headache.")
        );
    }

    #[test]
    fn no_match_response_has_no_text() {
        let json = r#"{"RecognitionStatus":"NoMatch"}"#;
        let parsed: RecognitionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "NoMatch");
        assert!(parsed.display_text.is_none());
    }
}
