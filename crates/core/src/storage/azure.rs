use async_trait::async_trait;
use reqwest::{Client, Response};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::config::StorageConfig;
use super::error::StorageError;
use super::locator::BlobLocator;
use super::traits::BlobStore;
use crate::credentials::AccessToken;

/// Blob store speaking the Azure Blob REST API.
///
/// Uses virtual-host addressing (`https://{account}.{endpoint_suffix}`) by
/// default, or path-style addressing under a fixed `endpoint` when one is
/// configured (the emulator convention).
pub struct AzureBlobClient {
    client: Client,
    config: StorageConfig,
}

impl AzureBlobClient {
    pub fn new(config: StorageConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Build the request URL for a blob, percent-encoding each path segment.
    fn object_url(&self, locator: &BlobLocator) -> String {
        let container = urlencoding::encode(&locator.container);
        let object_path = locator
            .object_path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        match &self.config.endpoint {
            Some(endpoint) => format!(
                "{}/{}/{}/{}",
                endpoint.trim_end_matches('/'),
                locator.account,
                container,
                object_path
            ),
            None => format!(
                "https://{}.{}/{}/{}",
                locator.account, self.config.endpoint_suffix, container, object_path
            ),
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> StorageError {
        if e.is_timeout() {
            StorageError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else if e.is_connect() {
            StorageError::connection(e.to_string())
        } else {
            StorageError::transfer(e.to_string())
        }
    }

    async fn error_for_status(
        &self,
        response: Response,
        locator: &BlobLocator,
    ) -> StorageError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail: String = body.chars().take(200).collect();

        match status.as_u16() {
            404 => StorageError::blob_not_found(
                locator.container.clone(),
                locator.object_path.clone(),
            ),
            401 | 403 => StorageError::unauthorized(format!("HTTP {}: {}", status, detail)),
            code => StorageError::unexpected_status(code, detail),
        }
    }
}

#[async_trait]
impl BlobStore for AzureBlobClient {
    fn name(&self) -> &str {
        "azure_blob"
    }

    async fn download(
        &self,
        locator: &BlobLocator,
        token: &AccessToken,
        dest: &Path,
    ) -> Result<u64, StorageError> {
        let url = self.object_url(locator);
        debug!(blob = %locator, "Downloading blob");

        let mut response = self
            .client
            .get(&url)
            .bearer_auth(&token.token)
            .header("x-ms-version", &self.config.api_version)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(self.error_for_status(response, locator).await);
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut bytes_written: u64 = 0;
        while let Some(chunk) = response.chunk().await.map_err(|e| self.map_send_error(e))? {
            file.write_all(&chunk).await?;
            bytes_written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(blob = %locator, bytes = bytes_written, "Blob downloaded");
        Ok(bytes_written)
    }

    async fn upload(
        &self,
        locator: &BlobLocator,
        token: &AccessToken,
        source: &Path,
    ) -> Result<u64, StorageError> {
        let body = tokio::fs::read(source).await?;
        let bytes_sent = body.len() as u64;

        let url = self.object_url(locator);
        debug!(blob = %locator, bytes = bytes_sent, "Uploading blob");

        let response = self
            .client
            .put(&url)
            .bearer_auth(&token.token)
            .header("x-ms-version", &self.config.api_version)
            .header("x-ms-blob-type", "BlockBlob")
            .header("Content-Type", "application/octet-stream")
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(self.error_for_status(response, locator).await);
        }

        debug!(blob = %locator, "Blob uploaded");
        Ok(bytes_sent)
    }
}
