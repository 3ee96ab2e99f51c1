use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::RelayError;
use super::types::{RelayRequest, RelaySummary, SUCCESS_MESSAGE};
use super::workspace::Workspace;
use crate::credentials::TokenCredential;
use crate::metrics::{
    BYTES_DOWNLOADED, BYTES_UPLOADED, RELAYS_TOTAL, RELAY_DURATION, STAGE_DURATION,
};
use crate::storage::{BlobLocator, BlobStore, ContainerLocator, StorageError};
use crate::transcoder::TranscodeRunner;

/// Name the transcoded result is stored under in the destination container.
/// Repeat relays against the same container overwrite it.
pub const OUTPUT_OBJECT_NAME: &str = "output.mp4";

/// Drives one relay order end to end: validate, fetch, transcode, deliver.
///
/// Collaborators are injected once at startup. Each run gets its own
/// workspace and its own credential fetch; the pipeline keeps no per-run
/// state between calls, so one instance serves concurrent requests.
pub struct RelayPipeline {
    store: Arc<dyn BlobStore>,
    credential: Arc<dyn TokenCredential>,
    transcoder: TranscodeRunner,
    workspace_root: Option<PathBuf>,
}

impl RelayPipeline {
    pub fn new(
        store: Arc<dyn BlobStore>,
        credential: Arc<dyn TokenCredential>,
        transcoder: TranscodeRunner,
    ) -> Self {
        Self {
            store,
            credential,
            transcoder,
            workspace_root: None,
        }
    }

    /// Put workspaces under a fixed directory instead of the system temp dir.
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Run one relay to completion.
    pub async fn run(&self, request: RelayRequest) -> Result<RelaySummary, RelayError> {
        let relay_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        info!(relay_id, "Relay started");

        let result = self.run_guarded(&relay_id, &request).await;
        let duration = started.elapsed();

        match &result {
            Ok(summary) => {
                RELAYS_TOTAL.with_label_values(&["success"]).inc();
                RELAY_DURATION
                    .with_label_values(&["success"])
                    .observe(duration.as_secs_f64());
                info!(
                    relay_id,
                    bytes_downloaded = summary.bytes_downloaded,
                    bytes_uploaded = summary.bytes_uploaded,
                    duration_ms = duration.as_millis() as u64,
                    "Relay completed"
                );
            }
            Err(e) => {
                RELAYS_TOTAL.with_label_values(&[e.kind()]).inc();
                RELAY_DURATION
                    .with_label_values(&["failed"])
                    .observe(duration.as_secs_f64());
                warn!(
                    relay_id,
                    kind = e.kind(),
                    error = %e,
                    duration_ms = duration.as_millis() as u64,
                    "Relay failed"
                );
            }
        }

        result.map(|mut summary| {
            summary.duration_ms = duration.as_millis() as u64;
            summary
        })
    }

    /// Validation, workspace lifetime, and the stages in between. The
    /// workspace is removed on every exit, success or failure.
    async fn run_guarded(
        &self,
        relay_id: &str,
        request: &RelayRequest,
    ) -> Result<RelaySummary, RelayError> {
        request.validate()?;

        let workspace = Workspace::create(self.workspace_root.as_deref(), relay_id)
            .map_err(RelayError::workspace)?;
        debug!(relay_id, workspace = %workspace.path().display(), "Workspace prepared");

        let outcome = self.run_stages(relay_id, request, &workspace).await;
        workspace.close();
        outcome
    }

    async fn run_stages(
        &self,
        relay_id: &str,
        request: &RelayRequest,
        workspace: &Workspace,
    ) -> Result<RelaySummary, RelayError> {
        let source =
            BlobLocator::parse(&request.source_object_url).map_err(RelayError::invalid_source)?;
        debug!(relay_id, source = %source, "Source locator resolved");

        let token = self
            .credential
            .get_token()
            .await
            .map_err(RelayError::credential)?;
        debug!(
            relay_id,
            provider = self.credential.provider_name(),
            "Credential acquired"
        );

        let download_started = Instant::now();
        let bytes_downloaded = self
            .store
            .download(&source, &token, workspace.input_path())
            .await
            .map_err(|e| match e {
                StorageError::BlobNotFound {
                    container,
                    object_path,
                } => RelayError::SourceNotFound {
                    container,
                    object_path,
                },
                other => RelayError::download(other),
            })?;
        STAGE_DURATION
            .with_label_values(&["download"])
            .observe(download_started.elapsed().as_secs_f64());
        BYTES_DOWNLOADED.inc_by(bytes_downloaded);
        info!(relay_id, bytes = bytes_downloaded, "Source blob downloaded");

        let binary = self
            .transcoder
            .resolve_binary()
            .map_err(RelayError::binary_missing)?;
        debug!(relay_id, binary = %binary.display(), "Transcoding binary resolved");

        let transcode_started = Instant::now();
        self.transcoder
            .run(
                &binary,
                workspace.input_path(),
                &request.transform_instruction,
                workspace.output_path(),
            )
            .await
            .map_err(RelayError::execution)?;
        STAGE_DURATION
            .with_label_values(&["transcode"])
            .observe(transcode_started.elapsed().as_secs_f64());
        info!(relay_id, "Transcoding completed");

        // Destination problems surface only now, after the work is done;
        // they are deliberately framed as upload failures.
        let destination = ContainerLocator::parse(&request.destination_container_url)
            .map_err(RelayError::invalid_destination)?;
        let target = destination.object(OUTPUT_OBJECT_NAME);

        let upload_started = Instant::now();
        let bytes_uploaded = self
            .store
            .upload(&target, &token, workspace.output_path())
            .await
            .map_err(RelayError::upload)?;
        STAGE_DURATION
            .with_label_values(&["upload"])
            .observe(upload_started.elapsed().as_secs_f64());
        BYTES_UPLOADED.inc_by(bytes_uploaded);
        info!(relay_id, destination = %target, bytes = bytes_uploaded, "Result uploaded");

        Ok(RelaySummary {
            relay_id: relay_id.to_string(),
            message: SUCCESS_MESSAGE.to_string(),
            bytes_downloaded,
            bytes_uploaded,
            duration_ms: 0,
        })
    }
}
