use serde::{Deserialize, Serialize};

use super::error::RelayError;

/// Response body for a successful relay.
pub const SUCCESS_MESSAGE: &str = "video processed successfully";

/// One transcoding relay order: where to read, what to do, where to write.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    /// Full URL of the source blob
    pub source_object_url: String,
    /// URL of the destination container the result lands in
    pub destination_container_url: String,
    /// Transcoder arguments between input and output, shell-quoted
    pub transform_instruction: String,
}

impl RelayRequest {
    pub fn new(
        source_object_url: impl Into<String>,
        destination_container_url: impl Into<String>,
        transform_instruction: impl Into<String>,
    ) -> Self {
        Self {
            source_object_url: source_object_url.into(),
            destination_container_url: destination_container_url.into(),
            transform_instruction: transform_instruction.into(),
        }
    }

    /// All three fields must be present and non-empty. The first gap wins.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.source_object_url.is_empty() {
            return Err(RelayError::MissingField {
                field: "sourceObjectUrl",
            });
        }
        if self.destination_container_url.is_empty() {
            return Err(RelayError::MissingField {
                field: "destinationContainerUrl",
            });
        }
        if self.transform_instruction.is_empty() {
            return Err(RelayError::MissingField {
                field: "transformInstruction",
            });
        }
        Ok(())
    }
}

/// What a finished relay reports back.
#[derive(Debug, Clone, Serialize)]
pub struct RelaySummary {
    pub relay_id: String,
    pub message: String,
    pub bytes_downloaded: u64,
    pub bytes_uploaded: u64,
    pub duration_ms: u64,
}
