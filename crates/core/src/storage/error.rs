use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Blob not found at {container}/{object_path}")]
    BlobNotFound {
        container: String,
        object_path: String,
    },

    #[error("Storage request unauthorized: {detail}")]
    Unauthorized { detail: String },

    #[error("Storage request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("Storage connection failed: {detail}")]
    Connection { detail: String },

    #[error("Storage returned HTTP {status}: {detail}")]
    UnexpectedStatus { status: u16, detail: String },

    #[error("Transfer failed: {detail}")]
    Transfer { detail: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn blob_not_found(container: impl Into<String>, object_path: impl Into<String>) -> Self {
        Self::BlobNotFound {
            container: container.into(),
            object_path: object_path.into(),
        }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Unauthorized {
            detail: detail.into(),
        }
    }

    pub fn connection(detail: impl Into<String>) -> Self {
        Self::Connection {
            detail: detail.into(),
        }
    }

    pub fn unexpected_status(status: u16, detail: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            detail: detail.into(),
        }
    }

    pub fn transfer(detail: impl Into<String>) -> Self {
        Self::Transfer {
            detail: detail.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::Io(_)
        )
    }
}
