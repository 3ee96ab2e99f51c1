//! Transcode API handler.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use ferryman_core::RelayRequest;

use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Relay parameters as they may arrive in the query string or the JSON body.
///
/// Every field is optional at this layer; the pipeline validates the merged
/// result and names the first missing field in its error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscodeParams {
    /// Full URL of the blob to download.
    pub source_object_url: Option<String>,
    /// URL of the container the result is written to.
    pub destination_container_url: Option<String>,
    /// Command-line fragment handed to the transcoding binary.
    pub transform_instruction: Option<String>,
}

impl TranscodeParams {
    /// Merge with a fallback source, field by field. `self` wins.
    fn or(self, fallback: TranscodeParams) -> TranscodeParams {
        TranscodeParams {
            source_object_url: self.source_object_url.or(fallback.source_object_url),
            destination_container_url: self
                .destination_container_url
                .or(fallback.destination_container_url),
            transform_instruction: self.transform_instruction.or(fallback.transform_instruction),
        }
    }

    fn into_request(self) -> RelayRequest {
        RelayRequest::new(
            self.source_object_url.unwrap_or_default(),
            self.destination_container_url.unwrap_or_default(),
            self.transform_instruction.unwrap_or_default(),
        )
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Run one relay: download the source blob, transcode it, upload the result.
///
/// Responds with plain text either way: the success message on 200, the
/// relay error on 400/404/500.
pub async fn transcode(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TranscodeParams>,
    body: Bytes,
) -> (StatusCode, String) {
    // A missing or unparsable body is not an error; the query string may
    // carry the parameters instead.
    let body_params: TranscodeParams = serde_json::from_slice(&body).unwrap_or_default();
    let request = body_params.or(query).into_request();

    match state.pipeline().run(request).await {
        Ok(summary) => {
            debug!(relay_id = %summary.relay_id, "Transcode request served");
            (StatusCode::OK, summary.message)
        }
        Err(e) => {
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, e.to_string())
        }
    }
}
