//! Storage bridge for uploaded medical documents
//!
//! Uploads files to a hosted bucket under a per-owner path
//! (`owner/filename`), detects whether an identically named object is
//! already stored (and reuses it instead of re-uploading), and issues
//! short-lived signed URLs for downstream retrieval.
//!
//! Name collision is deliberately treated as "already stored": there is
//! no content hashing, so two different files with the same name alias
//! each other. The reuse path logs a warning so the aliasing is visible
//! in operations.

pub mod backends;
pub mod error;
pub mod store;

pub use backends::bucket::{BucketBackend, StorageConfig};
pub use backends::memory::MemoryBackend;
pub use backends::{ObjectInfo, ObjectStore};
pub use error::{StorageError, StorageResult};
pub use store::{DocumentStore, SIGNED_URL_EXPIRY_SECS};
