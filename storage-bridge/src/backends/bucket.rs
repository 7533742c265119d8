//! Hosted bucket backend
//!
//! REST client for a Supabase-style storage API: `list` is a filtered
//! prefix listing, `upload` writes the object body, and signed URLs are
//! issued by the service and joined back onto the storage base URL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::backends::{ObjectInfo, ObjectStore};
use crate::error::{StorageError, StorageResult};

/// Bucket storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base URL of the storage service
    pub base_url: String,
    /// Bucket holding uploaded medical documents
    pub bucket: String,
    /// Service key used for authenticated storage calls
    pub service_key: SecretString,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl StorageConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns [`StorageError::Backend`] when `STORAGE_SERVICE_KEY` is
    /// not set.
    pub fn from_env() -> StorageResult<Self> {
        let service_key = std::env::var("STORAGE_SERVICE_KEY")
            .map_err(|_| StorageError::Backend("STORAGE_SERVICE_KEY is not set".to_string()))?;

        let base_url = std::env::var("STORAGE_URL")
            .unwrap_or_else(|_| "http://localhost:54321".to_string());

        let bucket = std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "med-docs".to_string());

        let request_timeout_secs = std::env::var("STORAGE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            base_url,
            bucket,
            service_key: SecretString::new(service_key),
            request_timeout_secs,
        })
    }
}

#[derive(Debug, Serialize)]
struct ListRequest<'a> {
    prefix: &'a str,
    search: &'a str,
}

#[derive(Debug, Deserialize)]
struct ListedObject {
    name: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    metadata: Option<ListedObjectMetadata>,
}

#[derive(Debug, Deserialize)]
struct ListedObjectMetadata {
    #[serde(default)]
    size: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key", default)]
    key: Option<String>,
}

#[derive(Debug, Serialize)]
struct SignRequest {
    #[serde(rename = "expiresIn")]
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL", default)]
    signed_url: Option<String>,
}

/// Hosted bucket storage backend
pub struct BucketBackend {
    http: reqwest::Client,
    config: StorageConfig,
}

impl BucketBackend {
    /// Create a backend from configuration.
    ///
    /// # Errors
    /// Returns [`StorageError::Network`] if the HTTP client cannot be
    /// built.
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    fn object_url(&self, suffix: &str) -> String {
        format!(
            "{}/storage/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            suffix
        )
    }
}

#[async_trait]
impl ObjectStore for BucketBackend {
    async fn list(&self, prefix: &str, search: &str) -> StorageResult<Vec<ObjectInfo>> {
        let url = self.object_url(&format!("object/list/{}", self.config.bucket));

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.service_key.expose_secret())
            .json(&ListRequest { prefix, search })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Backend(format!(
                "list returned {status} for prefix {prefix}"
            )));
        }

        let listed: Vec<ListedObject> = response.json().await?;
        debug!(prefix, search, count = listed.len(), "Listed bucket objects");

        Ok(listed
            .into_iter()
            .map(|object| ObjectInfo {
                name: object.name,
                size: object.metadata.and_then(|m| m.size),
                created_at: object.created_at,
            })
            .collect())
    }

    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<ObjectInfo> {
        let url = self.object_url(&format!("object/{}/{}", self.config.bucket, path));
        let size = data.len() as u64;

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.service_key.expose_secret())
            .header("Content-Type", content_type)
            .body(data)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Upload(format!(
                "upstream returned {status}: {body}"
            )));
        }

        let descriptor: UploadResponse = response.json().await?;
        if descriptor.key.is_none() {
            return Err(StorageError::Upload(
                "upstream returned no object descriptor".to_string(),
            ));
        }

        info!(path, size, "Uploaded object");

        Ok(ObjectInfo {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            size: Some(size),
            created_at: Some(Utc::now()),
        })
    }

    async fn create_signed_url(&self, path: &str, expires_in_secs: u64) -> StorageResult<String> {
        let url = self.object_url(&format!("object/sign/{}/{}", self.config.bucket, path));

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.service_key.expose_secret())
            .json(&SignRequest {
                expires_in: expires_in_secs,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Signing(format!(
                "upstream returned {status} for {path}"
            )));
        }

        let signed: SignResponse = response.json().await?;
        match signed.signed_url {
            Some(relative) if !relative.is_empty() => Ok(format!(
                "{}/storage/v1{}",
                self.config.base_url.trim_end_matches('/'),
                relative
            )),
            _ => Err(StorageError::Signing(
                "upstream returned no signed URL".to_string(),
            )),
        }
    }
}
