//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides mock implementations of the external service traits,
//! allowing full relay tests without real storage or a metadata service.
//!
//! # Example
//!
//! ```rust,ignore
//! use ferryman_core::testing::{MockBlobStore, MockCredential};
//!
//! let store = MockBlobStore::new();
//! let credential = MockCredential::new();
//!
//! // Seed the blob the relay will download
//! store.seed_blob_for_url(
//!     "https://acct.blob.core.windows.net/media/clip.mp4",
//!     b"media bytes",
//! ).await;
//!
//! // Use in a RelayPipeline...
//! ```

mod mock_blob_store;
mod mock_credential;

pub use mock_blob_store::{MockBlobStore, RecordedDownload, RecordedUpload};
pub use mock_credential::MockCredential;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::relay::RelayRequest;
    use crate::storage::BlobLocator;

    /// Create a blob locator without going through URL parsing.
    pub fn blob_locator(account: &str, container: &str, object_path: &str) -> BlobLocator {
        BlobLocator {
            account: account.to_string(),
            container: container.to_string(),
            object_path: object_path.to_string(),
        }
    }

    /// Create a complete relay request against the given account.
    pub fn relay_request(account: &str) -> RelayRequest {
        RelayRequest::new(
            format!(
                "https://{}.blob.core.windows.net/media/raw/clip.mp4",
                account
            ),
            format!("https://{}.blob.core.windows.net/processed", account),
            r#"-vf "scale=1280:720" -c:a copy"#,
        )
    }

    /// Byte payload that looks vaguely like an MP4: `ftyp` box header
    /// followed by patterned filler.
    pub fn mp4_bytes(len: usize) -> Vec<u8> {
        let header: &[u8] = &[
            0x00, 0x00, 0x00, 0x18, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm',
        ];
        let mut bytes = header.to_vec();
        bytes.extend((0..len.saturating_sub(header.len())).map(|i| (i % 251) as u8));
        bytes
    }
}
