use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscoderError {
    #[error("Transcoding binary '{name}' not found; searched: {searched}")]
    BinaryMissing { name: String, searched: String },

    #[error("Unterminated quote in transform instruction")]
    UnterminatedQuote,

    #[error("Failed to launch transcoder at {path}: {source}")]
    LaunchFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transcoder failed: {diagnostic}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        diagnostic: String,
    },

    #[error("Transcoder produced no output file at {path}")]
    OutputMissing { path: PathBuf },

    #[error("Transcoding timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscoderError {
    pub fn binary_missing(name: impl Into<String>, searched: &[String]) -> Self {
        Self::BinaryMissing {
            name: name.into(),
            searched: searched.join(", "),
        }
    }

    pub fn launch_failed(path: PathBuf, source: std::io::Error) -> Self {
        Self::LaunchFailed { path, source }
    }

    /// Failure report for a finished process: stderr if it said anything,
    /// otherwise the exit code.
    pub fn execution_failed(exit_code: Option<i32>, stderr: &str) -> Self {
        let trimmed = stderr.trim();
        let diagnostic = if trimmed.is_empty() {
            format!("transcoder exited with code: {:?}", exit_code)
        } else {
            trimmed.to_string()
        };
        Self::ExecutionFailed {
            exit_code,
            diagnostic,
        }
    }
}
