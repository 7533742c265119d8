//! Note capture flow
//!
//! The orchestrating state machine behind the journal page: merges live
//! transcript output with manual edits, summarizes and persists the note
//! on save, and runs document analysis on an explicitly selected file.
//!
//! Collaborators are injected behind the [`Summarizer`], [`EntryStore`]
//! and [`DocumentAnalyzer`] seams; the server wires in the real AI
//! gateway, journal repository and document store. One operation runs at
//! a time: a save or analyze issued while another is in flight is
//! rejected with [`CaptureError::Busy`] instead of racing.

pub mod error;
pub mod flow;
pub mod seams;

pub use error::{CaptureError, CaptureResult};
pub use flow::{NoteCaptureFlow, SaveOutcome, SelectedFile};
pub use seams::{DocumentAnalyzer, EntryStore, Summarizer};
