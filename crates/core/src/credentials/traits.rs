use async_trait::async_trait;
use thiserror::Error;

use super::types::AccessToken;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Token endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("Token request timed out")]
    Timeout,

    #[error("Token request rejected: {0}")]
    Rejected(String),

    #[error("Malformed token response: {0}")]
    MalformedResponse(String),

    #[error("Credential configuration error: {0}")]
    ConfigurationError(String),
}

impl CredentialError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Timeout)
    }
}

/// Source of bearer tokens for storage requests.
///
/// Implementations are injected where tokens are needed; nothing below this
/// trait reads ambient process state to find a credential.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Fetch a token scoped to the configured resource
    async fn get_token(&self) -> Result<AccessToken, CredentialError>;
}
