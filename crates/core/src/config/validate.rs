use super::{types::Config, ConfigError};
use crate::credentials::CredentialProvider;

/// Validate configuration
/// Currently validates:
/// - Credentials section exists (enforced by serde)
/// - Server port is not 0
/// - Timeouts are not 0
/// - Static token provider has a token
/// - Managed identity provider has a resource
/// - Storage endpoint override, when set, is an http(s) URL
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Storage validation
    if config.storage.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "storage.timeout_secs cannot be 0".to_string(),
        ));
    }
    if let Some(endpoint) = &config.storage.endpoint {
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::ValidationError(
                "storage.endpoint must be an http:// or https:// URL".to_string(),
            ));
        }
    }

    // Credentials validation
    if config.credentials.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "credentials.timeout_secs cannot be 0".to_string(),
        ));
    }
    match config.credentials.provider {
        CredentialProvider::StaticToken => {
            if config
                .credentials
                .token
                .as_ref()
                .is_none_or(|t| t.is_empty())
            {
                return Err(ConfigError::ValidationError(
                    "credentials.token must be set when provider is static_token".to_string(),
                ));
            }
        }
        CredentialProvider::ManagedIdentity => {
            if config.credentials.resource.is_empty() {
                return Err(ConfigError::ValidationError(
                    "credentials.resource cannot be empty when provider is managed_identity"
                        .to_string(),
                ));
            }
        }
    }

    // Transcoder validation
    if config.transcoder.run_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "transcoder.run_timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
