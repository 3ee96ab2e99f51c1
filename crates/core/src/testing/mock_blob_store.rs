//! Mock blob store for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::credentials::AccessToken;
use crate::storage::{BlobLocator, BlobStore, StorageError};

/// A recorded download for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedDownload {
    /// Which blob was requested.
    pub locator: BlobLocator,
    /// The bearer token the request carried.
    pub token: String,
}

/// A recorded upload for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    /// Where the blob was written.
    pub locator: BlobLocator,
    /// The bytes that were uploaded.
    pub bytes: Vec<u8>,
    /// The bearer token the request carried.
    pub token: String,
}

/// Mock implementation of the BlobStore trait.
///
/// Provides controllable behavior for testing:
/// - Seed blobs that downloads serve
/// - Track downloads and uploads for assertions
/// - Inject one-shot errors on either direction
///
/// Uploads land in the same in-memory map downloads read from, so tests can
/// assert on the final stored bytes.
///
/// # Example
///
/// ```rust,ignore
/// use ferryman_core::testing::MockBlobStore;
///
/// let store = MockBlobStore::new();
/// store.seed_blob(&locator, b"media bytes").await;
///
/// // ... run the code under test ...
///
/// let uploads = store.recorded_uploads().await;
/// assert_eq!(uploads.len(), 1);
/// assert_eq!(uploads[0].locator.object_path, "output.mp4");
/// ```
#[derive(Debug)]
pub struct MockBlobStore {
    /// Stored blobs, keyed by `account/container/object_path`.
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    /// Recorded downloads.
    downloads: Arc<RwLock<Vec<RecordedDownload>>>,
    /// Recorded uploads.
    uploads: Arc<RwLock<Vec<RecordedUpload>>>,
    /// If set, the next download will fail with this error.
    next_download_error: Arc<RwLock<Option<StorageError>>>,
    /// If set, the next upload will fail with this error.
    next_upload_error: Arc<RwLock<Option<StorageError>>>,
}

impl Default for MockBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBlobStore {
    /// Create a new mock store with no blobs.
    pub fn new() -> Self {
        Self {
            blobs: Arc::new(RwLock::new(HashMap::new())),
            downloads: Arc::new(RwLock::new(Vec::new())),
            uploads: Arc::new(RwLock::new(Vec::new())),
            next_download_error: Arc::new(RwLock::new(None)),
            next_upload_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Seed a blob that subsequent downloads will serve.
    pub async fn seed_blob(&self, locator: &BlobLocator, bytes: &[u8]) {
        self.blobs
            .write()
            .await
            .insert(Self::key(locator), bytes.to_vec());
    }

    /// Seed a blob addressed by its request URL.
    pub async fn seed_blob_for_url(&self, url: &str, bytes: &[u8]) {
        let locator = BlobLocator::parse(url).expect("seed URL must be a valid blob URL");
        self.seed_blob(&locator, bytes).await;
    }

    /// Current bytes stored for a blob, if any.
    pub async fn blob_bytes(&self, locator: &BlobLocator) -> Option<Vec<u8>> {
        self.blobs.read().await.get(&Self::key(locator)).cloned()
    }

    /// Get all recorded downloads.
    pub async fn recorded_downloads(&self) -> Vec<RecordedDownload> {
        self.downloads.read().await.clone()
    }

    /// Get the number of downloads performed.
    pub async fn download_count(&self) -> usize {
        self.downloads.read().await.len()
    }

    /// Get all recorded uploads.
    pub async fn recorded_uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.read().await.clone()
    }

    /// Get the number of uploads performed.
    pub async fn upload_count(&self) -> usize {
        self.uploads.read().await.len()
    }

    /// Configure the next download to fail with the given error.
    pub async fn set_next_download_error(&self, error: StorageError) {
        *self.next_download_error.write().await = Some(error);
    }

    /// Configure the next upload to fail with the given error.
    pub async fn set_next_upload_error(&self, error: StorageError) {
        *self.next_upload_error.write().await = Some(error);
    }

    fn key(locator: &BlobLocator) -> String {
        format!(
            "{}/{}/{}",
            locator.account, locator.container, locator.object_path
        )
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn download(
        &self,
        locator: &BlobLocator,
        token: &AccessToken,
        dest: &Path,
    ) -> Result<u64, StorageError> {
        self.downloads.write().await.push(RecordedDownload {
            locator: locator.clone(),
            token: token.token.clone(),
        });

        if let Some(err) = self.next_download_error.write().await.take() {
            return Err(err);
        }

        let bytes = self
            .blobs
            .read()
            .await
            .get(&Self::key(locator))
            .cloned()
            .ok_or_else(|| {
                StorageError::blob_not_found(
                    locator.container.clone(),
                    locator.object_path.clone(),
                )
            })?;

        tokio::fs::write(dest, &bytes).await?;
        Ok(bytes.len() as u64)
    }

    async fn upload(
        &self,
        locator: &BlobLocator,
        token: &AccessToken,
        source: &Path,
    ) -> Result<u64, StorageError> {
        if let Some(err) = self.next_upload_error.write().await.take() {
            return Err(err);
        }

        let bytes = tokio::fs::read(source).await?;
        let len = bytes.len() as u64;

        self.blobs
            .write()
            .await
            .insert(Self::key(locator), bytes.clone());
        self.uploads.write().await.push(RecordedUpload {
            locator: locator.clone(),
            bytes,
            token: token.token.clone(),
        });

        Ok(len)
    }
}
