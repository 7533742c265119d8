//! In-memory storage backend
//!
//! Holds objects in a map behind an async lock. Used by tests and local
//! development; signed URLs use a `memory://` scheme.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::backends::{ObjectInfo, ObjectStore};
use crate::error::{StorageError, StorageResult};

struct StoredObject {
    data: Vec<u8>,
    content_type: String,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct MemoryBackend {
    objects: RwLock<HashMap<String, StoredObject>>,
    upload_count: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of uploads performed, for asserting dedup behavior.
    pub fn upload_count(&self) -> usize {
        self.upload_count.load(Ordering::SeqCst)
    }

    /// Stored bytes for a path, if present.
    pub async fn object_data(&self, path: &str) -> Option<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(path)
            .map(|object| object.data.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryBackend {
    async fn list(&self, prefix: &str, search: &str) -> StorageResult<Vec<ObjectInfo>> {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));
        let objects = self.objects.read().await;

        Ok(objects
            .iter()
            .filter_map(|(path, object)| {
                let name = path.strip_prefix(&prefix)?;
                if !name.contains(search) {
                    return None;
                }
                Some(ObjectInfo {
                    name: name.to_string(),
                    size: Some(object.data.len() as u64),
                    created_at: Some(object.created_at),
                })
            })
            .collect())
    }

    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<ObjectInfo> {
        if path.is_empty() {
            return Err(StorageError::Upload("empty object path".to_string()));
        }

        let size = data.len() as u64;
        let created_at = Utc::now();
        self.objects.write().await.insert(
            path.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
                created_at,
            },
        );
        self.upload_count.fetch_add(1, Ordering::SeqCst);

        Ok(ObjectInfo {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            size: Some(size),
            created_at: Some(created_at),
        })
    }

    async fn create_signed_url(&self, path: &str, expires_in_secs: u64) -> StorageResult<String> {
        let objects = self.objects.read().await;
        let object = objects
            .get(path)
            .ok_or_else(|| StorageError::Signing(format!("no such object: {path}")))?;

        Ok(format!(
            "memory://{path}?expires_in={expires_in_secs}&content_type={}",
            object.content_type
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn list_scopes_to_prefix_and_search_term() {
        let backend = MemoryBackend::new();
        backend
            .upload("owner-a/scan.png", vec![1, 2], "image/png")
            .await
            .unwrap();
        backend
            .upload("owner-a/report.pdf", vec![3], "application/pdf")
            .await
            .unwrap();
        backend
            .upload("owner-b/scan.png", vec![4], "image/png")
            .await
            .unwrap();

        let matches = backend.list("owner-a", "scan.png").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "scan.png");
        assert_eq!(matches[0].size, Some(2));
    }

    #[tokio::test]
    async fn signing_a_missing_object_fails() {
        let backend = MemoryBackend::new();
        let result = backend.create_signed_url("owner/missing.png", 3600).await;
        assert!(matches!(result, Err(StorageError::Signing(_))));
    }
}
