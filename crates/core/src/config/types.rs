use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::credentials::{CredentialProvider, CredentialsConfig};
use crate::storage::StorageConfig;
use crate::transcoder::TranscoderConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub transcoder: TranscoderConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub credentials: SanitizedCredentialsConfig,
    pub transcoder: TranscoderConfig,
}

/// Sanitized credentials config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCredentialsConfig {
    pub provider: String,
    pub resource: String,
    pub client_id_configured: bool,
    pub token_configured: bool,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            storage: config.storage.clone(),
            credentials: SanitizedCredentialsConfig {
                provider: match config.credentials.provider {
                    CredentialProvider::ManagedIdentity => "managed_identity".to_string(),
                    CredentialProvider::StaticToken => "static_token".to_string(),
                },
                resource: config.credentials.resource.clone(),
                client_id_configured: config
                    .credentials
                    .client_id
                    .as_ref()
                    .is_some_and(|id| !id.is_empty()),
                token_configured: config
                    .credentials
                    .token
                    .as_ref()
                    .is_some_and(|t| !t.is_empty()),
                timeout_secs: config.credentials.timeout_secs,
            },
            transcoder: config.transcoder.clone(),
        }
    }
}
