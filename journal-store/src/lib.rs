//! Journal entry persistence
//!
//! Repository over the `journal_entries` table: insert-returning, list
//! newest-first scoped to the owning user, and owner-scoped delete.
//! Entries are immutable once written; the AI summary is attached at
//! creation time and never recomputed.

pub mod connection;
pub mod error;
pub mod models;
pub mod repository;

pub use connection::connect;
pub use error::{JournalError, JournalResult};
pub use models::JournalEntry;
pub use repository::JournalRepository;
