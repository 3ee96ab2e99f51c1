use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Transcoder binary resolution and execution configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscoderConfig {
    /// Binary file name looked up in the search locations
    #[serde(default = "default_binary_name")]
    pub binary_name: String,

    /// Fixed path a deployment bundles the binary at
    #[serde(default = "default_deployment_path")]
    pub deployment_path: PathBuf,

    /// Whether to walk the `PATH` environment variable
    #[serde(default = "default_search_path")]
    pub search_path: bool,

    /// Well-known locations tried after the `PATH` walk
    #[serde(default = "default_system_paths")]
    pub system_paths: Vec<PathBuf>,

    /// Maximum wall-clock run time for one transcode in seconds
    #[serde(default = "default_run_timeout_secs")]
    pub run_timeout_secs: u64,
}

fn default_binary_name() -> String {
    "ffmpeg".to_string()
}

fn default_deployment_path() -> PathBuf {
    PathBuf::from("/home/site/wwwroot/bin/ffmpeg")
}

fn default_search_path() -> bool {
    true
}

fn default_system_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/bin/ffmpeg"),
        PathBuf::from("/usr/local/bin/ffmpeg"),
    ]
}

fn default_run_timeout_secs() -> u64 {
    600
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            binary_name: default_binary_name(),
            deployment_path: default_deployment_path(),
            search_path: default_search_path(),
            system_paths: default_system_paths(),
            run_timeout_secs: default_run_timeout_secs(),
        }
    }
}

impl TranscoderConfig {
    pub fn with_binary_name(mut self, name: impl Into<String>) -> Self {
        self.binary_name = name.into();
        self
    }

    pub fn with_deployment_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.deployment_path = path.into();
        self
    }

    pub fn with_search_path(mut self, search_path: bool) -> Self {
        self.search_path = search_path;
        self
    }

    pub fn with_system_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.system_paths = paths;
        self
    }

    pub fn with_run_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.run_timeout_secs = timeout_secs;
        self
    }
}
