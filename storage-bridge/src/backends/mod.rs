pub mod bucket;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageResult;

/// Metadata for a stored object, relative to the listing prefix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object name relative to the listed prefix
    pub name: String,
    /// Object size in bytes, when the backend reports it
    pub size: Option<u64>,
    /// Creation timestamp, when the backend reports it
    pub created_at: Option<DateTime<Utc>>,
}

/// Storage backend trait for bucket-style operations
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List objects under a prefix whose names contain the search term.
    async fn list(&self, prefix: &str, search: &str) -> StorageResult<Vec<ObjectInfo>>;

    /// Upload an object to the given path.
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<ObjectInfo>;

    /// Issue a signed URL for the object at the given path.
    async fn create_signed_url(&self, path: &str, expires_in_secs: u64) -> StorageResult<String>;
}
