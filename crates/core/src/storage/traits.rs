use async_trait::async_trait;
use std::path::Path;

use super::error::StorageError;
use super::locator::BlobLocator;
use crate::credentials::AccessToken;

/// Moves blobs between remote storage and local files.
///
/// Implementations authenticate each request with the caller-supplied token;
/// they hold no credential state of their own.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store backend name for logging
    fn name(&self) -> &str;

    /// Download a blob to a local file, returning the number of bytes written
    async fn download(
        &self,
        locator: &BlobLocator,
        token: &AccessToken,
        dest: &Path,
    ) -> Result<u64, StorageError>;

    /// Upload a local file to a blob, returning the number of bytes sent.
    /// Existing blobs at the same locator are overwritten.
    async fn upload(
        &self,
        locator: &BlobLocator,
        token: &AccessToken,
        source: &Path,
    ) -> Result<u64, StorageError>;
}
