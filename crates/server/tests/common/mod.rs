//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process router
//! with mock collaborators injected, enabling full API tests without blob
//! storage or an installed transcoding binary.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use ferryman_core::{
    credentials::TokenCredential,
    storage::BlobStore,
    testing::{MockBlobStore, MockCredential},
    Config, CredentialsConfig, RelayPipeline, ServerConfig, StorageConfig, TranscodeRunner,
    TranscoderConfig, OUTPUT_OBJECT_NAME,
};
use ferryman_server::api::create_router;
use ferryman_server::state::AppState;

/// Re-export fixtures for test convenience
pub use ferryman_core::testing::fixtures;

/// Script body that copies the input file to the output slot unchanged.
#[cfg(unix)]
pub const IDENTITY_SCRIPT: &str = "cp \"$in\" \"$last\"\n";

/// Test fixture for E2E testing with mock collaborators.
///
/// Provides an in-process router with fully controllable mocks for:
/// - Blob storage (MockBlobStore): seed sources, inspect uploads
/// - Token acquisition (MockCredential): count issues, inject failures
///
/// The transcoding binary is a shell script written into a temp directory,
/// or deliberately unresolvable for tests that must not reach it.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_transcode_succeeds() {
///     let fixture = TestFixture::new();
///     fixture.seed_source(b"media bytes").await;
///
///     let response = fixture
///         .post("/api/v1/transcode", TestFixture::transcode_body())
///         .await;
///
///     assert_status!(response, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock blob store - seed blobs, record transfers
    pub store: Arc<MockBlobStore>,
    /// Mock credential - count token issues, inject errors
    pub credential: Arc<MockCredential>,
    /// Directory the pipeline creates its per-relay workspaces under
    pub workspace_root: TempDir,
    /// Holds the stand-in transcoder script for the fixture's lifetime
    _bin_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("Response body is not valid JSON")
    }
}

impl TestFixture {
    /// Create a fixture whose transcoder copies input to output unchanged.
    #[cfg(unix)]
    pub fn new() -> Self {
        Self::with_script(IDENTITY_SCRIPT)
    }

    /// Create a fixture with a custom transcoder script body.
    #[cfg(unix)]
    pub fn with_script(body: &str) -> Self {
        let bin_dir = TempDir::new().expect("Failed to create bin dir");
        let script = write_transcoder_script(bin_dir.path(), body);

        let transcoder_config = TranscoderConfig::default()
            .with_binary_name("scripted-transcoder")
            .with_deployment_path(script)
            .with_search_path(false)
            .with_system_paths(vec![]);

        Self::with_transcoder_config(transcoder_config, bin_dir)
    }

    /// Create a fixture whose transcoder can never be resolved.
    pub fn with_unresolvable_transcoder() -> Self {
        let bin_dir = TempDir::new().expect("Failed to create bin dir");

        let transcoder_config = TranscoderConfig::default()
            .with_binary_name("missing-test-transcoder")
            .with_deployment_path("/nonexistent/test/transcoder")
            .with_search_path(false)
            .with_system_paths(vec![]);

        Self::with_transcoder_config(transcoder_config, bin_dir)
    }

    fn with_transcoder_config(transcoder_config: TranscoderConfig, bin_dir: TempDir) -> Self {
        let workspace_root = TempDir::new().expect("Failed to create workspace root");

        let store = Arc::new(MockBlobStore::new());
        let credential = Arc::new(MockCredential::new());

        // The config the /config endpoint reports; the pipeline itself runs
        // on the injected mocks.
        let config = Config {
            credentials: CredentialsConfig::static_token("fixture-secret-token"),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            transcoder: transcoder_config.clone(),
        };

        let pipeline = RelayPipeline::new(
            Arc::clone(&store) as Arc<dyn BlobStore>,
            Arc::clone(&credential) as Arc<dyn TokenCredential>,
            TranscodeRunner::new(transcoder_config),
        )
        .with_workspace_root(workspace_root.path());

        let state = Arc::new(AppState::new(config, pipeline));
        let router = create_router(state);

        Self {
            router,
            store,
            credential,
            workspace_root,
            _bin_dir: bin_dir,
        }
    }

    /// Seed the blob that [`TestFixture::transcode_body`] points at.
    pub async fn seed_source(&self, bytes: &[u8]) {
        self.store
            .seed_blob(&fixtures::blob_locator("acct", "media", "raw/clip.mp4"), bytes)
            .await;
    }

    /// JSON body naming the seeded source and the standard destination.
    pub fn transcode_body() -> Value {
        serde_json::json!({
            "sourceObjectUrl": "https://acct.blob.core.windows.net/media/raw/clip.mp4",
            "destinationContainerUrl": "https://acct.blob.core.windows.net/processed",
            "transformInstruction": "-c copy",
        })
    }

    /// Bytes stored at the standard destination, if any relay delivered.
    pub async fn destination_bytes(&self) -> Option<Vec<u8>> {
        self.store
            .blob_bytes(&fixtures::blob_locator("acct", "processed", OUTPUT_OBJECT_NAME))
            .await
    }

    /// Send a GET request to the test router.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Send a request to the test router.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        TestResponse {
            status,
            body: String::from_utf8_lossy(&body_bytes).to_string(),
        }
    }
}

/// Write an executable shell script that plays the transcoder role.
///
/// The pipeline invokes it as `<script> -i <input> [tokens...] <output>`;
/// the preamble binds `$in` to the input path and `$last` to the output
/// path before the body runs.
#[cfg(unix)]
pub fn write_transcoder_script(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("scripted-transcoder");
    let script = format!("#!/bin/sh\nin=$2\nfor last in \"$@\"; do :; done\n{body}");
    std::fs::write(&path, script).expect("Failed to write transcoder script");
    let mut perms = std::fs::metadata(&path)
        .expect("Failed to stat transcoder script")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to mark script executable");
    path
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.body
        );
    };
}
