//! Speech bridge for dictated journal notes
//!
//! Wraps a hosted continuous speech-recognition service behind a small
//! state machine ([`SpeechBridge`], `Idle`/`Listening`) that accumulates
//! finalized transcript segments while exposing the in-progress partial
//! hypothesis, and a one-shot synthesis call ([`SpeechBridge::speak`]).
//!
//! The bridge is built through a capability-checked factory:
//! [`SpeechConfig::from_env`] returns [`SpeechError::Unsupported`] when
//! the host has no speech credentials, reported once at initialization.
//! Absence of the capability never panics.
//!
//! Transcript merging is explicit: [`TranscriptState`] tracks finalized
//! text, the transient partial buffer and a manual override, with the
//! precedence rule that a manual edit wins once the user has typed and
//! holds until the next recognized final segment.

pub mod bridge;
pub mod config;
pub mod error;
pub mod providers;
pub mod transcript;

pub use bridge::{BridgeState, SpeechBridge};
pub use config::SpeechConfig;
pub use error::{SpeechError, SpeechResult};
pub use providers::azure::AzureSpeechProvider;
pub use providers::{RecognizerEvent, RecognizerSession, SpeechProvider};
pub use transcript::TranscriptState;
