use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::backends::ObjectStore;
use crate::error::{StorageError, StorageResult};

/// Fixed expiry for issued signed URLs (one hour).
pub const SIGNED_URL_EXPIRY_SECS: u64 = 3600;

/// Per-owner document store over a bucket backend
///
/// `put` implements the upload flow: list the owner's objects filtered by
/// filename, reuse an identically named object instead of re-uploading,
/// otherwise upload to `owner/filename`, then issue a one-hour signed
/// URL. Signing failure is fatal in every path; an empty URL is never
/// returned to a caller.
pub struct DocumentStore {
    backend: Arc<dyn ObjectStore>,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn ObjectStore>) -> Self {
        Self { backend }
    }

    /// Store a file under `owner_id/filename` and return a signed URL for
    /// retrieval.
    ///
    /// # Errors
    /// [`StorageError::Upload`] when the upload call errors or yields no
    /// descriptor; [`StorageError::Signing`] when signed-URL issuance
    /// fails or produces an empty URL.
    pub async fn put(
        &self,
        owner_id: Uuid,
        filename: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String> {
        let owner = owner_id.to_string();
        let path = format!("{owner}/{filename}");

        let existing = self.backend.list(&owner, filename).await?;
        if existing.iter().any(|object| object.name == filename) {
            // Name-based dedup only: a different file with the same name
            // aliases the stored one. Kept deliberately, but made visible.
            warn!(
                %owner_id,
                filename,
                "Identically named object already stored; skipping upload without content comparison"
            );
        } else {
            self.backend.upload(&path, data, content_type).await?;
            info!(%owner_id, filename, "Stored new document");
        }

        let url = self
            .backend
            .create_signed_url(&path, SIGNED_URL_EXPIRY_SECS)
            .await?;
        if url.is_empty() {
            return Err(StorageError::Signing(
                "signed URL issuance returned an empty URL".to_string(),
            ));
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::memory::MemoryBackend;
    use crate::backends::{ObjectInfo, ObjectStore};
    use async_trait::async_trait;

    #[tokio::test]
    async fn second_upload_with_same_name_is_skipped() {
        let backend = Arc::new(MemoryBackend::new());
        let store = DocumentStore::new(Arc::clone(&backend) as Arc<dyn ObjectStore>);
        let owner = Uuid::new_v4();

        let first_url = store
            .put(owner, "scan.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();
        let second_url = store
            .put(owner, "scan.png", vec![9, 9, 9], "image/png")
            .await
            .unwrap();

        // One upload only, and the original bytes survive.
        assert_eq!(backend.upload_count(), 1);
        assert_eq!(
            backend
                .object_data(&format!("{owner}/scan.png"))
                .await
                .unwrap(),
            vec![1, 2, 3]
        );
        assert_eq!(first_url, second_url);
    }

    #[tokio::test]
    async fn same_name_under_different_owners_does_not_alias() {
        let backend = Arc::new(MemoryBackend::new());
        let store = DocumentStore::new(Arc::clone(&backend) as Arc<dyn ObjectStore>);

        store
            .put(Uuid::new_v4(), "scan.png", vec![1], "image/png")
            .await
            .unwrap();
        store
            .put(Uuid::new_v4(), "scan.png", vec![2], "image/png")
            .await
            .unwrap();

        assert_eq!(backend.upload_count(), 2);
    }

    /// Backend that stores nothing and signs everything as empty.
    struct EmptySigningBackend;

    #[async_trait]
    impl ObjectStore for EmptySigningBackend {
        async fn list(&self, _prefix: &str, _search: &str) -> StorageResult<Vec<ObjectInfo>> {
            Ok(Vec::new())
        }

        async fn upload(
            &self,
            path: &str,
            data: Vec<u8>,
            _content_type: &str,
        ) -> StorageResult<ObjectInfo> {
            Ok(ObjectInfo {
                name: path.rsplit('/').next().unwrap_or(path).to_string(),
                size: Some(data.len() as u64),
                created_at: None,
            })
        }

        async fn create_signed_url(
            &self,
            _path: &str,
            _expires_in_secs: u64,
        ) -> StorageResult<String> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn empty_signed_url_is_a_hard_failure() {
        let store = DocumentStore::new(Arc::new(EmptySigningBackend));
        let result = store
            .put(Uuid::new_v4(), "scan.png", vec![1], "image/png")
            .await;
        assert!(matches!(result, Err(StorageError::Signing(_))));
    }
}
