use serde::{Deserialize, Serialize};

/// Blob storage client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Domain suffix for virtual-host style addressing
    /// (`https://{account}.{endpoint_suffix}/...`)
    #[serde(default = "default_endpoint_suffix")]
    pub endpoint_suffix: String,

    /// Base URL override for path-style addressing
    /// (`{endpoint}/{account}/...`), used against emulators
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Storage REST API version sent with every request
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Timeout for individual transfer requests in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint_suffix() -> String {
    "blob.core.windows.net".to_string()
}

fn default_api_version() -> String {
    "2021-08-06".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint_suffix: default_endpoint_suffix(),
            endpoint: None,
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StorageConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
