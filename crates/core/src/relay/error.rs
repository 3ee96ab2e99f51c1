use thiserror::Error;

/// Terminal failure of a relay run.
///
/// Component errors are flattened to strings at the stage boundary; what a
/// variant keeps is its HTTP status class and the caller-facing framing. The
/// two post-transcode variants share one message prefix so callers can tell
/// the work succeeded and only delivery failed.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("missing required field '{field}': please pass sourceObjectUrl, destinationContainerUrl, and transformInstruction in the request body or query parameters")]
    MissingField { field: &'static str },

    #[error("invalid blob URL format: {detail}")]
    InvalidSource { detail: String },

    #[error("failed to prepare workspace: {detail}")]
    Workspace { detail: String },

    #[error("failed to acquire storage credential: {detail}")]
    Credential { detail: String },

    #[error("input blob not found at {container}/{object_path}")]
    SourceNotFound {
        container: String,
        object_path: String,
    },

    #[error("failed to download source blob: {detail}")]
    Download { detail: String },

    #[error("transcoding binary unavailable: {detail}")]
    BinaryMissing { detail: String },

    #[error("transcoding failed: {detail}")]
    Execution { detail: String },

    #[error("processing completed but upload failed: {detail}")]
    InvalidDestination { detail: String },

    #[error("processing completed but upload failed: {detail}")]
    Upload { detail: String },
}

impl RelayError {
    pub fn invalid_source(cause: impl std::fmt::Display) -> Self {
        Self::InvalidSource {
            detail: cause.to_string(),
        }
    }

    pub fn workspace(cause: impl std::fmt::Display) -> Self {
        Self::Workspace {
            detail: cause.to_string(),
        }
    }

    pub fn credential(cause: impl std::fmt::Display) -> Self {
        Self::Credential {
            detail: cause.to_string(),
        }
    }

    pub fn download(cause: impl std::fmt::Display) -> Self {
        Self::Download {
            detail: cause.to_string(),
        }
    }

    pub fn binary_missing(cause: impl std::fmt::Display) -> Self {
        Self::BinaryMissing {
            detail: cause.to_string(),
        }
    }

    pub fn execution(cause: impl std::fmt::Display) -> Self {
        Self::Execution {
            detail: cause.to_string(),
        }
    }

    pub fn invalid_destination(cause: impl std::fmt::Display) -> Self {
        Self::InvalidDestination {
            detail: cause.to_string(),
        }
    }

    pub fn upload(cause: impl std::fmt::Display) -> Self {
        Self::Upload {
            detail: cause.to_string(),
        }
    }

    /// HTTP status the relay endpoint answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingField { .. } | Self::InvalidSource { .. } => 400,
            Self::SourceNotFound { .. } => 404,
            Self::Workspace { .. }
            | Self::Credential { .. }
            | Self::Download { .. }
            | Self::BinaryMissing { .. }
            | Self::Execution { .. }
            | Self::InvalidDestination { .. }
            | Self::Upload { .. } => 500,
        }
    }

    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::InvalidSource { .. } => "invalid_source",
            Self::Workspace { .. } => "workspace",
            Self::Credential { .. } => "credential",
            Self::SourceNotFound { .. } => "source_not_found",
            Self::Download { .. } => "download",
            Self::BinaryMissing { .. } => "binary_missing",
            Self::Execution { .. } => "execution",
            Self::InvalidDestination { .. } => "invalid_destination",
            Self::Upload { .. } => "upload",
        }
    }
}
